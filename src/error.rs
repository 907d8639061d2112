//! Error types for the knowledge extraction pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Annotation error: {0}")]
    Annotation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_annotation() {
        let err = Error::Annotation("head index 12 out of range".to_string());
        assert!(err.to_string().contains("Annotation error"));
        assert!(err.to_string().contains("head index 12"));
    }

    #[test]
    fn test_error_display_unsupported_format() {
        let err = Error::UnsupportedFormat(".xls".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Unsupported file format"));
        assert!(msg.contains(".xls"));
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("max_sentences must be positive".to_string());
        assert!(err.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("bad value".to_string());
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();

        assert!(matches!(err, Error::SerializationError(_)));
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_from_serde_yaml() {
        let yaml_err = serde_yaml::from_str::<Vec<i32>>("{ a: [").unwrap_err();
        let err: Error = yaml_err.into();

        assert!(matches!(err, Error::SerializationError(_)));
    }

    #[test]
    fn test_error_all_variants_debug() {
        let variants: Vec<Error> = vec![
            Error::Annotation("ann".to_string()),
            Error::InvalidInput("input".to_string()),
            Error::UnsupportedFormat("fmt".to_string()),
            Error::Config("cfg".to_string()),
            Error::SerializationError("serial".to_string()),
            Error::Unknown("unknown".to_string()),
        ];

        for err in variants {
            let debug_str = format!("{:?}", err);
            assert!(!debug_str.is_empty());
        }
    }

    #[test]
    fn test_result_unwrap_or_else() {
        let result: Result<i32> = Err(Error::Unknown("error".to_string()));
        let value = result.unwrap_or_else(|_| 42);
        assert_eq!(value, 42);
    }
}
