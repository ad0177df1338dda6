// Demo configuration
//
// Every tunable constant of the demo lives here. `Default` reproduces the
// classic scene; `from_env` layers a few overrides on top for quick
// experiments without recompiling.

use glam::Vec3;
use log::info;
use std::time::Duration;

/// Environment variable overriding the spawn period (milliseconds)
pub const ENV_SPAWN_MS: &str = "FALLING_SPHERES_SPAWN_MS";
/// Environment variable overriding the device pixel ratio cap
pub const ENV_MAX_PIXEL_RATIO: &str = "FALLING_SPHERES_MAX_PIXEL_RATIO";
/// Environment variable overriding the push force, as "x,y,z"
pub const ENV_PUSH_FORCE: &str = "FALLING_SPHERES_PUSH_FORCE";

/// Configuration errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),

    #[error("Spawn period must be non-zero")]
    ZeroSpawnPeriod,

    #[error("Pixel ratio cap must be at least 1.0, got {0}")]
    InvalidPixelRatio(f32),

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be within [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value:?}")]
    NonFinite { name: &'static str, value: Vec3 },

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Window settings
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Upper bound applied to the device pixel ratio
    pub max_pixel_ratio: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Falling Spheres".to_string(),
            width: 1280,
            height: 720,
            max_pixel_ratio: 2.0,
        }
    }
}

/// Perspective camera and orbit controls
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    /// Orbit damping factor (0 = no inertia decay, 1 = no inertia)
    pub damping_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(5.0, 7.0, 5.0),
            target: Vec3::ZERO,
            damping_factor: 0.1,
        }
    }
}

/// Physics world settings
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub gravity: Vec3,
    /// Fixed step advanced once per frame (seconds)
    pub timestep: f32,
    pub allow_sleep: bool,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.82, 0.0),
            timestep: 1.0 / 60.0,
            allow_sleep: true,
            linear_damping: 0.01,
            angular_damping: 0.01,
        }
    }
}

/// Scene geometry and contact parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Clear colour as 0xRRGGBB
    pub clear_color: u32,
    pub shadows: bool,
    /// Floor box dimensions (width, height, depth)
    pub floor_size: Vec3,
    pub floor_color: u32,
    pub sphere_radius: f32,
    pub sphere_mass: f32,
    pub sphere_color: u32,
    pub sphere_spawn_point: Vec3,
    /// Friction of the floor/sphere contact pair
    pub contact_friction: f32,
    /// Restitution of the floor/sphere contact pair
    pub contact_restitution: f32,
    /// Constant force applied each tick to every sphere
    pub push_force: Vec3,
    pub light_position: Vec3,
    pub light_color: u32,
    pub marker_color: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: 0x333333,
            shadows: true,
            floor_size: Vec3::new(6.0, 1.0, 6.0),
            floor_color: 0xffffff,
            sphere_radius: 0.5,
            sphere_mass: 1.0,
            sphere_color: 0x4f8fd6,
            sphere_spawn_point: Vec3::new(0.0, 3.0, 0.0),
            contact_friction: 0.1,
            contact_restitution: 0.5,
            push_force: Vec3::new(0.0, 0.0, 1.0),
            light_position: Vec3::new(0.0, 10.0, 0.0),
            light_color: 0xffffff,
            marker_color: 0x00ff00,
        }
    }
}

/// Sphere spawner settings
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnConfig {
    pub period: Duration,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(500),
        }
    }
}

/// Complete demo configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub physics: PhysicsConfig,
    pub scene: SceneConfig,
    pub spawn: SpawnConfig,
}

impl DemoConfig {
    /// Defaults with environment overrides applied, validated
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides using the given variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SPAWN_MS) {
            let millis: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_SPAWN_MS,
                value: value.clone(),
            })?;
            self.spawn.period = Duration::from_millis(millis);
            info!("Spawn period overridden to {}ms", millis);
        }

        if let Some(value) = lookup(ENV_MAX_PIXEL_RATIO) {
            let ratio: f32 = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_MAX_PIXEL_RATIO,
                value: value.clone(),
            })?;
            self.window.max_pixel_ratio = ratio;
            info!("Pixel ratio cap overridden to {}", ratio);
        }

        if let Some(value) = lookup(ENV_PUSH_FORCE) {
            self.scene.push_force = parse_vec3(&value).ok_or_else(|| ConfigError::InvalidEnv {
                var: ENV_PUSH_FORCE,
                value: value.clone(),
            })?;
            info!("Push force overridden to {:?}", self.scene.push_force);
        }

        Ok(())
    }

    /// Check that every value can be used to build the scene
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dt = self.physics.timestep;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ConfigError::InvalidTimestep(dt));
        }

        if self.spawn.period.is_zero() {
            return Err(ConfigError::ZeroSpawnPeriod);
        }

        if !(self.window.max_pixel_ratio >= 1.0) {
            return Err(ConfigError::InvalidPixelRatio(self.window.max_pixel_ratio));
        }

        let scene = &self.scene;
        positive("floor width", scene.floor_size.x)?;
        positive("floor height", scene.floor_size.y)?;
        positive("floor depth", scene.floor_size.z)?;
        positive("sphere radius", scene.sphere_radius)?;
        positive("sphere mass", scene.sphere_mass)?;
        positive("camera near plane", self.camera.near)?;
        positive("camera far plane", self.camera.far - self.camera.near)?;

        finite("push force", scene.push_force)?;
        finite("gravity", self.physics.gravity)?;
        finite("sphere spawn point", scene.sphere_spawn_point)?;

        unit_range("contact friction", scene.contact_friction)?;
        unit_range("contact restitution", scene.contact_restitution)?;
        unit_range("camera damping", self.camera.damping_factor)?;

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn finite(name: &'static str, value: Vec3) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

fn unit_range(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

fn parse_vec3(value: &str) -> Option<Vec3> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;

    match parts.as_slice() {
        [x, y, z] => Some(Vec3::new(*x, *y, *z)),
        _ => None,
    }
}

/// Split a 0xRRGGBB colour into linear-ish RGBA floats
pub fn rgba(hex: u32) -> [f32; 4] {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    [r, g, b, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn.period, Duration::from_millis(500));
        assert_eq!(config.scene.floor_size, Vec3::new(6.0, 1.0, 6.0));
        assert_eq!(config.window.max_pixel_ratio, 2.0);
    }

    #[test]
    fn test_rejects_zero_timestep() {
        let mut config = DemoConfig::default();
        config.physics.timestep = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimestep(0.0)));
    }

    #[test]
    fn test_rejects_zero_spawn_period() {
        let mut config = DemoConfig::default();
        config.spawn.period = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroSpawnPeriod));
    }

    #[test]
    fn test_rejects_out_of_range_restitution() {
        let mut config = DemoConfig::default();
        config.scene.contact_restitution = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange { name: "contact restitution", .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_sphere_mass() {
        let mut config = DemoConfig::default();
        config.scene.sphere_mass = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "sphere mass", .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DemoConfig::default();
        let lookup = lookup_from(&[
            (ENV_SPAWN_MS, "250"),
            (ENV_MAX_PIXEL_RATIO, "1.5"),
            (ENV_PUSH_FORCE, "1, 0, -2"),
        ]);

        config.apply_overrides(lookup).unwrap();

        assert_eq!(config.spawn.period, Duration::from_millis(250));
        assert_eq!(config.window.max_pixel_ratio, 1.5);
        assert_eq!(config.scene.push_force, Vec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = DemoConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[(ENV_PUSH_FORCE, "1,2")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_PUSH_FORCE, .. }));
    }

    #[test]
    fn test_non_finite_push_force_is_rejected() {
        let mut config = DemoConfig::default();
        config
            .apply_overrides(lookup_from(&[(ENV_PUSH_FORCE, "NaN,0,0")]))
            .unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { name: "push force", .. }));

        config.scene.push_force = Vec3::new(0.0, f32::INFINITY, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rgba() {
        assert_eq!(rgba(0xffffff), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(rgba(0x00ff00), [0.0, 1.0, 0.0, 1.0]);
        let grey = rgba(0x333333);
        assert!((grey[0] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::ZeroSpawnPeriod;
        assert_eq!(err.to_string(), "Spawn period must be non-zero");
    }
}
