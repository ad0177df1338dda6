/// Frame loop lifecycle and timing
///
/// Every frame advances the simulation by exactly one fixed step; there is
/// no accumulator and no interpolation, so a slow display slows the
/// simulation down instead of making it catch up. The loop measures the
/// real time between frames only for the spawn timer and the FPS counter.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Physics step advanced once per frame (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// How often (in frames) the FPS average is refreshed and logged
const FPS_LOG_INTERVAL: u64 = 300;

/// Shared flag that stops a frame loop from outside
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Lifecycle of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Created, not yet started
    Idle,
    /// Frames are being produced
    Running,
    /// Halted; may be started again
    Stopped,
    /// Torn down for good
    Disposed,
}

/// Timing of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Real time since the previous frame
    pub real_delta: Duration,
}

/// Frame loop state and timing
pub struct FrameLoop {
    state: LoopState,
    token: CancellationToken,

    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameLoop {
    /// Create a new, idle frame loop
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            token: CancellationToken::new(),
            last_frame_time: Instant::now(),
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Start producing frames. Returns false if the loop was disposed or
    /// its token cancelled.
    pub fn start(&mut self) -> bool {
        if self.state == LoopState::Disposed || self.token.is_cancelled() {
            return false;
        }
        if self.state != LoopState::Running {
            self.state = LoopState::Running;
            // The first frame after (re)starting should not see the idle gap
            self.last_frame_time = Instant::now();
            log::info!("Frame loop started");
        }
        true
    }

    /// Stop producing frames
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Stopped;
            log::info!("Frame loop stopped after {} frames", self.frame_count);
        }
    }

    /// Stop for good and cancel the token
    pub fn dispose(&mut self) {
        if self.state != LoopState::Disposed {
            self.token.cancel();
            self.state = LoopState::Disposed;
            log::info!("Frame loop disposed");
        }
    }

    /// Token that cancels this loop when triggered
    #[cfg(test)]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether the next `begin_frame` would produce a frame
    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running && !self.token.is_cancelled()
    }

    /// Begin a new frame, or return None if the loop is not running.
    ///
    /// A cancelled token moves the loop to `Disposed`.
    pub fn begin_frame(&mut self) -> Option<FrameTiming> {
        let now = Instant::now();
        self.begin_frame_at(now)
    }

    /// Begin a new frame at a given instant
    pub fn begin_frame_at(&mut self, now: Instant) -> Option<FrameTiming> {
        if self.token.is_cancelled() && self.state != LoopState::Disposed {
            self.dispose();
        }
        if self.state != LoopState::Running {
            return None;
        }

        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % FPS_LOG_INTERVAL == 0 {
            self.update_fps();
            log::debug!("{:.1} FPS over the last {} frames", self.current_fps, self.frame_times.len());
        }

        Some(FrameTiming {
            frame: self.frame_count,
            real_delta: frame_time,
        })
    }

    /// Get the fixed timestep for physics updates (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames produced
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        // Calculate average frame time
        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        // Convert to FPS
        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_loop_creation() {
        let frame_loop = FrameLoop::new();
        assert_eq!(frame_loop.frame_count(), 0);
        assert_eq!(frame_loop.state(), LoopState::Idle);
        assert!(!frame_loop.is_running());
    }

    #[test]
    fn test_fixed_timestep() {
        let frame_loop = FrameLoop::new();
        assert_eq!(frame_loop.fixed_timestep(), FIXED_TIMESTEP);
        assert!((frame_loop.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_no_frames_before_start() {
        let mut frame_loop = FrameLoop::new();
        assert!(frame_loop.begin_frame().is_none());
        assert_eq!(frame_loop.frame_count(), 0);
    }

    #[test]
    fn test_frame_counting() {
        let mut frame_loop = FrameLoop::new();
        assert!(frame_loop.start());

        assert_eq!(frame_loop.begin_frame().map(|t| t.frame), Some(1));
        assert_eq!(frame_loop.begin_frame().map(|t| t.frame), Some(2));
        assert_eq!(frame_loop.frame_count(), 2);
    }

    #[test]
    fn test_real_delta_is_measured() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.start();
        let start = Instant::now();
        frame_loop.begin_frame_at(start);

        let timing = frame_loop
            .begin_frame_at(start + Duration::from_millis(40))
            .unwrap();
        assert_eq!(timing.real_delta, Duration::from_millis(40));
    }

    #[test]
    fn test_stop_and_restart() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.start();
        frame_loop.begin_frame();

        frame_loop.stop();
        assert_eq!(frame_loop.state(), LoopState::Stopped);
        assert!(frame_loop.begin_frame().is_none());

        assert!(frame_loop.start());
        assert!(frame_loop.begin_frame().is_some());
        assert_eq!(frame_loop.frame_count(), 2);
    }

    #[test]
    fn test_cancellation_token_disposes() {
        let mut frame_loop = FrameLoop::new();
        let token = frame_loop.cancellation_token();
        frame_loop.start();

        token.cancel();
        assert!(!frame_loop.is_running());
        assert!(frame_loop.begin_frame().is_none());
        assert_eq!(frame_loop.state(), LoopState::Disposed);
    }

    #[test]
    fn test_disposed_loop_cannot_restart() {
        let mut frame_loop = FrameLoop::new();
        frame_loop.start();
        frame_loop.dispose();

        assert!(!frame_loop.start());
        assert!(frame_loop.begin_frame().is_none());
        assert!(frame_loop.cancellation_token().is_cancelled());
    }
}
