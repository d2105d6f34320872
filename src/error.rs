//! Unified error hierarchy for fittrack
//!
//! Separates malformed sensor packages (wrong arity, wrong number kind) from
//! values that parse but cannot describe a real workout, and wraps the
//! errors of the file formats packages can be loaded from.

use thiserror::Error;

/// Top-level error type for all fittrack operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Raw package could not be turned into a typed workout
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Workout fields parsed but are out of range
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV package file errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON package file or output errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML package file errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors raised while converting positional sensor values into a workout
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Value list length does not match the workout's field count
    #[error("{code} expects {expected} values, got {actual}")]
    WrongArity {
        code: String,
        expected: usize,
        actual: usize,
    },

    /// A count field received a fractional or negative number
    #[error("{field} must be a non-negative whole number, got {value}")]
    NotAnInteger { field: &'static str, value: f64 },

    /// Package file extension is not one of csv, json, toml
    #[error("Unsupported package format: {extension}")]
    UnknownFormat { extension: String },

    /// Package file parsed but its structure is wrong
    #[error("Malformed {format} package: {reason}")]
    Malformed { format: String, reason: String },
}

/// Errors for values that are well-formed but physically meaningless
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Field must be strictly positive
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// Field is NaN or infinite
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// Result type alias for fittrack operations
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackerError::Parse(_) => ErrorSeverity::Warning,
            TrackerError::Validation(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::Parse(ParseError::WrongArity {
                code,
                expected,
                actual,
            }) => {
                format!(
                    "Workout {} needs {} sensor values but {} were supplied.",
                    code, expected, actual
                )
            }
            TrackerError::Validation(ValidationError::NonPositive { field, .. }) => {
                format!("The {} of a workout has to be a positive number.", field)
            }
            TrackerError::Parse(ParseError::UnknownFormat { extension }) => {
                format!(
                    "Cannot read '{}' files. Use a .csv, .json or .toml package file.",
                    extension
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = TrackerError::from(ParseError::WrongArity {
            code: "RUN".to_string(),
            expected: 3,
            actual: 2,
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = TrackerError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_error_display() {
        let err = TrackerError::from(ValidationError::NonPositive {
            field: "duration",
            value: 0.0,
        });
        assert_eq!(
            err.to_string(),
            "Validation error: duration must be greater than zero, got 0"
        );
    }

    #[test]
    fn test_user_messages() {
        let err = TrackerError::from(ParseError::WrongArity {
            code: "SWM".to_string(),
            expected: 5,
            actual: 3,
        });
        assert!(err.user_message().contains("needs 5 sensor values"));

        let err = TrackerError::from(ParseError::UnknownFormat {
            extension: "xml".to_string(),
        });
        assert!(err.user_message().contains(".csv"));
    }
}
