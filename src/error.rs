//! Initialization-time failures
//!
//! Frame rendering itself cannot fail; these only surface while wiring up
//! the host surface and configuration.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Failed to initialize terminal: {0}")]
    Terminal(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_error_display() {
        let err = InitError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "no tty"));
        assert!(err.to_string().contains("no tty"));
        assert!(err.to_string().contains("terminal"));
    }

    #[test]
    fn test_config_error_passthrough() {
        let err = InitError::from(ConfigError::Validation("bad ramp".to_string()));
        assert_eq!(err.to_string(), "Configuration validation error: bad ramp");
    }
}
