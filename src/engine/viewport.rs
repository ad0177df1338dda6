// Viewport management: keeps the camera aspect and the render surface in
// step with the window

use log::{debug, info};

use crate::engine::renderer::{Camera, SceneRenderer};

/// Size of the drawing surface in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Tracks the window size and derives camera aspect and surface size
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Logical (CSS-like) width
    width: f32,
    /// Logical height
    height: f32,
    /// Device pixel ratio after clamping
    pixel_ratio: f32,
    /// Upper bound for the pixel ratio
    max_pixel_ratio: f32,
}

impl Viewport {
    /// Create a viewport; call `resize` to establish the initial size
    pub fn new(max_pixel_ratio: f32) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            pixel_ratio: 1.0,
            max_pixel_ratio: max_pixel_ratio.max(1.0),
        }
    }

    /// Apply a new window size (logical units) and device pixel ratio.
    ///
    /// Updates the camera aspect and projection and returns the physical
    /// surface size. Degenerate sizes (a minimised window) are ignored and
    /// return `None`.
    pub fn resize(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f64,
        camera: &mut Camera,
    ) -> Option<SurfaceSize> {
        if width <= 0.0 || height <= 0.0 {
            debug!("Ignoring degenerate viewport size {}x{}", width, height);
            return None;
        }

        self.width = width;
        self.height = height;
        let ratio = device_pixel_ratio as f32;
        self.pixel_ratio = if ratio > 0.0 {
            ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        };

        camera.set_aspect(width / height);

        let size = self.surface_size();
        info!(
            "Viewport resized to {}x{} (pixel ratio {}, surface {}x{})",
            width, height, self.pixel_ratio, size.width, size.height
        );
        Some(size)
    }

    /// Resize and forward the surface size to a renderer
    pub fn apply<R: SceneRenderer + ?Sized>(
        &mut self,
        width: f32,
        height: f32,
        device_pixel_ratio: f64,
        camera: &mut Camera,
        renderer: &mut R,
    ) {
        if let Some(size) = self.resize(width, height, device_pixel_ratio, camera) {
            renderer.set_size(size.width, size.height);
        }
    }

    /// Physical surface size for the current logical size and pixel ratio
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize {
            width: (self.width * self.pixel_ratio).round() as u32,
            height: (self.height * self.pixel_ratio).round() as u32,
        }
    }

    /// Clamped device pixel ratio
    #[cfg(test)]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Logical size
    #[cfg(test)]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::{RenderError, Scene};

    #[derive(Default)]
    struct SizeRecorder {
        sizes: Vec<(u32, u32)>,
    }

    impl SceneRenderer for SizeRecorder {
        fn render(&mut self, _scene: &Scene, _camera: &Camera) -> Result<(), RenderError> {
            Ok(())
        }

        fn set_size(&mut self, width: u32, height: u32) {
            self.sizes.push((width, height));
        }
    }

    fn camera() -> Camera {
        Camera::new(75.0, 1.0, 0.1, 100.0)
    }

    #[test]
    fn test_aspect_follows_each_resize_exactly() {
        let mut viewport = Viewport::new(2.0);
        let mut camera = camera();

        viewport.resize(800.0, 600.0, 1.0, &mut camera);
        assert_eq!(camera.aspect(), 800.0 / 600.0);

        viewport.resize(1024.0, 768.0, 1.0, &mut camera);
        assert_eq!(camera.aspect(), 1024.0 / 768.0);
        assert_eq!(viewport.size(), (1024.0, 768.0));
    }

    #[test]
    fn test_pixel_ratio_is_clamped() {
        let mut viewport = Viewport::new(2.0);
        let mut camera = camera();

        let size = viewport.resize(800.0, 600.0, 3.0, &mut camera).unwrap();
        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(size, SurfaceSize { width: 1600, height: 1200 });

        let size = viewport.resize(800.0, 600.0, 1.5, &mut camera).unwrap();
        assert_eq!(viewport.pixel_ratio(), 1.5);
        assert_eq!(size, SurfaceSize { width: 1200, height: 900 });
    }

    #[test]
    fn test_degenerate_size_is_ignored() {
        let mut viewport = Viewport::new(2.0);
        let mut camera = camera();
        viewport.resize(800.0, 600.0, 1.0, &mut camera);

        assert!(viewport.resize(0.0, 600.0, 1.0, &mut camera).is_none());
        assert_eq!(camera.aspect(), 800.0 / 600.0);
    }

    #[test]
    fn test_apply_forwards_surface_size() {
        let mut viewport = Viewport::new(2.0);
        let mut camera = camera();
        let mut renderer = SizeRecorder::default();

        viewport.apply(640.0, 480.0, 2.0, &mut camera, &mut renderer);
        viewport.apply(0.0, 0.0, 2.0, &mut camera, &mut renderer);

        assert_eq!(renderer.sizes, vec![(1280, 960)]);
    }
}
