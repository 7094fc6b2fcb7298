use std::io;
use thiserror::Error;

/// Errors raised while loading, saving or validating a [`crate::config::FieldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ConfigError::Validation("speed_min must be positive".to_string());
        assert_eq!(
            format!("{}", error),
            "Validation error: speed_min must be positive"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing");
        let error: ConfigError = io_error.into();
        assert!(matches!(error, ConfigError::Io(_)));
    }
}
