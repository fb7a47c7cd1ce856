use thiserror::Error;

/// Result type alias for configuration operations
pub type ParseResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading, locating or persisting configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A token could not be decoded as the expected type
    #[error("Invalid value '{value}': expected {expected}")]
    InvalidValue { value: String, expected: String },

    /// Section braces do not balance
    #[error("Structural error in '{path}' at line {line}: {message}")]
    Structural {
        path: String,
        line: usize,
        message: String,
    },

    /// A single directive line could not be split into its fields
    #[error("Malformed {directive} line '{line}': {reason}")]
    MalformedDirective {
        directive: String,
        line: String,
        reason: String,
    },

    /// File I/O error
    #[error("I/O error for '{path}': {message}")]
    Io { path: String, message: String },

    /// `source` directives nested deeper than allowed
    #[error("Maximum source recursion depth ({max}) exceeded at '{path}'")]
    SourceDepth { path: String, max: usize },

    /// Custom error with message
    #[error("{message}")]
    Custom { message: String },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(value: impl Into<String>, expected: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a structural error
    pub fn structural(path: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        ConfigError::Structural {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a malformed directive error
    pub fn malformed(
        directive: impl Into<String>,
        line: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::MalformedDirective {
            directive: directive.into(),
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a source depth error
    pub fn source_depth(path: impl Into<String>, max: usize) -> Self {
        ConfigError::SourceDepth {
            path: path.into(),
            max,
        }
    }

    /// Create a custom error
    pub fn custom(message: impl Into<String>) -> Self {
        ConfigError::Custom {
            message: message.into(),
        }
    }

    /// Whether this error should abort the surrounding load
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ConfigError::MalformedDirective { .. } | ConfigError::InvalidValue { .. }
        )
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::io("<unknown>", err.to_string())
    }
}
