//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config JSON parsing error")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format `{0}` (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("autosize.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("autosize.toml"));

        let format_err = ConfigError::UnsupportedFormat(PathBuf::from("props.yaml"));
        let display = format!("{format_err}");
        assert!(display.contains("props.yaml"));
        assert!(display.contains(".toml or .json"));
    }
}
