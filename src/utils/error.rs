use crate::domain::model::{BoundaryOperation, Representation};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoundaryError {
    #[error("Encoding error during {context}: {detail} (encoding: {encoding})")]
    EncodingError {
        context: String,
        encoding: String,
        detail: String,
    },

    #[error("Representation type error: {operation} requires {expected}, got {found}")]
    RepresentationTypeError {
        operation: BoundaryOperation,
        expected: Representation,
        found: Representation,
    },

    #[error("Unknown encoding label: {label}")]
    UnknownEncoding { label: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Encoding,
    Process,
    Configuration,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BoundaryError {
    /// 編碼類錯誤：字元無法表示，或把文字交給只收位元組的邊界
    pub fn is_encoding_class(&self) -> bool {
        matches!(
            self,
            BoundaryError::EncodingError { .. } | BoundaryError::RepresentationTypeError { .. }
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            BoundaryError::EncodingError { .. }
            | BoundaryError::RepresentationTypeError { .. }
            | BoundaryError::UnknownEncoding { .. } => ErrorCategory::Encoding,
            BoundaryError::IoError(_) => ErrorCategory::Process,
            BoundaryError::SerializationError(_) => ErrorCategory::Report,
            BoundaryError::ConfigError { .. }
            | BoundaryError::ConfigValidationError { .. }
            | BoundaryError::InvalidConfigValueError { .. }
            | BoundaryError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Encoding => ErrorSeverity::Medium,
            ErrorCategory::Report => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Process => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BoundaryError::EncodingError { encoding, .. } => format!(
                "Encode the text explicitly with UTF-8 instead of relying on {}",
                encoding
            ),
            BoundaryError::RepresentationTypeError { expected, .. } => format!(
                "Convert the value to {} with an explicit encode/decode before crossing the boundary",
                expected
            ),
            BoundaryError::UnknownEncoding { .. } => {
                "Use a WHATWG encoding label such as 'utf-8'".to_string()
            }
            BoundaryError::IoError(_) => {
                "Check that the echo and passthrough commands exist on PATH".to_string()
            }
            BoundaryError::SerializationError(_) => "Retry without --json".to_string(),
            BoundaryError::ConfigError { .. }
            | BoundaryError::ConfigValidationError { .. }
            | BoundaryError::InvalidConfigValueError { .. }
            | BoundaryError::MissingConfigError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Encoding => format!("Text crossed a boundary without conversion: {}", self),
            ErrorCategory::Process => format!("Could not run an external command: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Report => format!("Could not write the report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BoundaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_class() {
        let err = BoundaryError::RepresentationTypeError {
            operation: BoundaryOperation::WriteProcessStdin,
            expected: Representation::Bytes,
            found: Representation::Text,
        };
        assert!(err.is_encoding_class());
        assert_eq!(err.category(), ErrorCategory::Encoding);
        assert!(err.to_string().contains("requires bytes, got text"));

        let io = BoundaryError::IoError(std::io::Error::other("boom"));
        assert!(!io.is_encoding_class());
        assert_eq!(io.severity(), ErrorSeverity::Critical);
    }
}
