use thiserror::Error;

/// Top-level error type for MindBridge.
///
/// Only the process edge can fail: reading configuration and catalog files,
/// or building domain values from untrusted data. Query, classification and
/// session operations are total and never return this type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MindbridgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for MindbridgeError {
    fn from(err: toml::de::Error) -> Self {
        MindbridgeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for MindbridgeError {
    fn from(err: toml::ser::Error) -> Self {
        MindbridgeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for MindbridgeError {
    fn from(err: serde_json::Error) -> Self {
        MindbridgeError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for MindBridge operations.
pub type Result<T> = std::result::Result<T, MindbridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MindbridgeError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_invalid_coordinate_display() {
        let err = MindbridgeError::InvalidCoordinate {
            latitude: 91.0,
            longitude: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid coordinate: latitude 91, longitude 0"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MindbridgeError = io_err.into();
        assert!(matches!(err, MindbridgeError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: MindbridgeError = json_err.into();
        assert!(matches!(err, MindbridgeError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: MindbridgeError = toml_err.into();
        assert!(matches!(err, MindbridgeError::Config(_)));
    }

    #[test]
    fn test_catalog_error_display() {
        let err = MindbridgeError::Catalog("duplicate resource id 3".to_string());
        assert_eq!(err.to_string(), "Catalog error: duplicate resource id 3");
    }
}
