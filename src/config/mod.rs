mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use nalgebra::Vector3;

pub use loader::load_config;

use crate::animation::Motion;
use crate::calibration::GridLimits;
use crate::ramp::{Ramp, DEFAULT_RAMP};
use crate::renderer::RenderOptions;
use crate::scene::Scene;
use crate::sdf::BoxSdf;
use crate::shade::Lighting;

/// Files tried, in order, when no config path is given
pub const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "ascii-cube.yaml",
    "ascii-cube.yml",
    "./config/ascii-cube.yaml",
];

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

/// Camera, cube, lighting and ramp
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: [f32; 3],
    pub half_extent: [f32; 3],
    pub max_distance: f32,
    pub epsilon: f32,
    /// Direction towards the light; normalized on load
    pub light_dir: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub fade_start: f32,
    /// Glyphs from background (must be a space) to densest
    pub ramp: String,
    /// Fraction of the screen height the resting cube fills
    pub fill_fraction: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: [0.0, 0.0, 3.0],
            half_extent: [0.75, 0.75, 0.75],
            max_distance: 10.0,
            epsilon: 0.002,
            light_dir: [0.6, 0.7, 0.3],
            ambient: 0.18,
            diffuse: 0.9,
            fade_start: 0.1,
            ramp: DEFAULT_RAMP.to_string(),
            fill_fraction: 0.42,
        }
    }
}

/// Renderer options and grid limits
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    pub max_steps: u32,
    /// Frame cap; 0 renders on every tick
    pub target_fps: f32,
    pub reduced_motion: bool,
    pub min_cols: usize,
    pub min_rows: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_steps: 48,
            target_fps: 30.0,
            reduced_motion: false,
            min_cols: 60,
            min_rows: 32,
        }
    }
}

/// Spin and bounce
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub rot_speed: f32,
    pub bounce_amp: f32,
    pub bounce_hz: f32,
    pub max_dt: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        let motion = Motion::default();
        Self {
            rot_speed: motion.rot_speed,
            bounce_amp: motion.bounce_amp,
            bounce_hz: motion.bounce_hz,
            max_dt: motion.max_dt,
        }
    }
}

/// Host terminal settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Cell size used when the terminal doesn't report pixel dimensions
    pub cell_width: f32,
    pub cell_height: f32,
    /// Input poll timeout per loop iteration
    pub poll_ms: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
            poll_ms: 16,
        }
    }
}

impl AppConfig {
    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load from `config_path`, else the first default path that exists,
    /// else the built-in defaults
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => {
                for p in DEFAULT_CONFIG_PATHS {
                    let path = Path::new(p);
                    if path.exists() {
                        return Self::from_file(path);
                    }
                }
                tracing::debug!("No config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject values that would make the renderer meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scene = &self.scene;
        let ramp_len = scene.ramp.chars().count();
        if ramp_len < 2 {
            return Err(ConfigError::Validation(
                "ramp needs a background and at least one glyph".to_string(),
            ));
        }
        if !scene.ramp.starts_with(' ') {
            return Err(ConfigError::Validation(
                "ramp must start with a space (the background)".to_string(),
            ));
        }
        if !(scene.epsilon > 0.0) {
            return Err(ConfigError::Validation("epsilon must be positive".to_string()));
        }
        if !(scene.max_distance > 0.0) {
            return Err(ConfigError::Validation(
                "max_distance must be positive".to_string(),
            ));
        }
        if scene.half_extent.iter().any(|&h| !(h > 0.0)) {
            return Err(ConfigError::Validation(
                "half_extent must be positive on every axis".to_string(),
            ));
        }
        if scene.light_dir.iter().all(|&c| c == 0.0) {
            return Err(ConfigError::Validation(
                "light_dir must not be the zero vector".to_string(),
            ));
        }
        if self.render.max_steps == 0 {
            return Err(ConfigError::Validation("max_steps must be at least 1".to_string()));
        }
        if self.render.target_fps < 0.0 {
            return Err(ConfigError::Validation(
                "target_fps must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_scene(&self) -> Scene {
        let s = &self.scene;
        Scene {
            camera: Vector3::from(s.camera),
            cube: BoxSdf::new(Vector3::from(s.half_extent)),
            max_distance: s.max_distance,
            epsilon: s.epsilon,
            lighting: Lighting::new(Vector3::from(s.light_dir), s.ambient, s.diffuse, s.fade_start),
            ramp: Ramp::new(&s.ramp),
            fill_fraction: s.fill_fraction,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        let target_frame_interval = if self.render.target_fps > 0.0 {
            Duration::from_secs_f32(1.0 / self.render.target_fps)
        } else {
            Duration::ZERO
        };
        RenderOptions {
            max_steps: self.render.max_steps,
            target_frame_interval,
            respect_reduced_motion: self.render.reduced_motion,
        }
    }

    pub fn grid_limits(&self) -> GridLimits {
        GridLimits {
            min_cols: self.render.min_cols,
            min_rows: self.render.min_rows,
        }
    }

    pub fn motion(&self) -> Motion {
        Motion {
            rot_speed: self.animation.rot_speed,
            bounce_amp: self.animation.bounce_amp,
            bounce_hz: self.animation.bounce_hz,
            max_dt: self.animation.max_dt,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_scene_matches_stock_cube() {
        let scene = AppConfig::default().to_scene();
        let stock = Scene::cube();
        assert_eq!(scene.camera, stock.camera);
        assert_eq!(scene.cube, stock.cube);
        assert_eq!(scene.lighting, stock.lighting);
        assert_eq!(scene.ramp, stock.ramp);
    }

    #[test]
    fn test_render_options_from_fps() {
        let mut config = AppConfig::default();
        config.render.target_fps = 20.0;
        let options = config.render_options();
        assert!((options.target_frame_interval.as_secs_f32() - 0.05).abs() < 1e-6);

        config.render.target_fps = 0.0;
        assert_eq!(config.render_options().target_frame_interval, Duration::ZERO);
    }

    #[test]
    fn test_validate_rejects_bad_ramp() {
        let mut config = AppConfig::default();
        config.scene.ramp = "@".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.scene.ramp = ".:#".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_degenerate_scene() {
        let mut config = AppConfig::default();
        config.scene.epsilon = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.scene.half_extent = [0.75, 0.0, 0.75];
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.scene.light_dir = [0.0, 0.0, 0.0];
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.render.max_steps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("render:\n  max_steps: 96\n").unwrap();
        assert_eq!(config.render.max_steps, 96);
        assert_eq!(config.render.min_cols, 60);
        assert_eq!(config.scene.ramp, DEFAULT_RAMP);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound("test.yaml".to_string());
        assert!(err.to_string().contains("test.yaml"));

        let err = ConfigError::Validation("bad ramp".to_string());
        assert!(err.to_string().contains("bad ramp"));
    }

    #[test]
    fn test_load_or_default_explicit_missing() {
        let result = AppConfig::load_or_default(Some(Path::new("/nonexistent/cube.yaml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
