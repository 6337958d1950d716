use std::path::Path;

use super::{AppConfig, ConfigError};

/// Load and validate configuration from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    tracing::info!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_config() {
        let result = load_config("/nonexistent/ascii-cube.yaml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_config_invalid_yaml() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let temp_file = temp_dir.path().join("invalid.yaml");
        std::fs::write(&temp_file, "scene: [unclosed").unwrap();

        let result = load_config(&temp_file);
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_valid() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let temp_file = temp_dir.path().join("ascii-cube.yaml");

        let config_content = r#"
scene:
  camera: [0.0, 0.0, 4.0]
  half_extent: [0.5, 0.5, 0.5]
  ramp: " .:#"

render:
  max_steps: 64
  target_fps: 15
  reduced_motion: true

animation:
  bounce_amp: 0.5

terminal:
  cell_width: 9
  cell_height: 18
"#;
        std::fs::write(&temp_file, config_content).unwrap();

        let config = load_config(&temp_file).unwrap();
        assert_eq!(config.scene.camera, [0.0, 0.0, 4.0]);
        assert_eq!(config.scene.ramp, " .:#");
        assert_eq!(config.render.max_steps, 64);
        assert!(config.render.reduced_motion);
        assert_eq!(config.animation.bounce_amp, 0.5);
        assert_eq!(config.animation.bounce_hz, 0.4);
        assert_eq!(config.terminal.cell_height, 18.0);
    }

    #[test]
    fn test_load_config_empty_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let temp_file = temp_dir.path().join("empty.yaml");
        std::fs::write(&temp_file, "{}\n").unwrap();

        let config = load_config(&temp_file).unwrap();
        assert_eq!(config.render.max_steps, 48);
    }

    #[test]
    fn test_load_config_fails_validation() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let temp_file = temp_dir.path().join("bad.yaml");
        std::fs::write(&temp_file, "scene:\n  ramp: \"#\"\n").unwrap();

        let result = load_config(&temp_file);
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_config_from_file() {
        let result = AppConfig::from_file("/nonexistent/path.yaml");
        assert!(result.is_err());
    }
}
