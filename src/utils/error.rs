//! Error handling for sciscript
//!
//! Conversion itself never fails: every input yields a best-effort string.
//! The error type covers configuration problems and I/O around the core,
//! while [`ConversionWarning`] carries the non-fatal issues found while
//! formatting an expression.

use std::fmt;

/// Error type for configuration and I/O around conversion
#[derive(Debug, Clone)]
pub enum ConversionError {
    /// Invalid input handed to a fallible entry point
    InvalidInput { message: String },
    /// Configuration violates an invariant (empty unit symbol, zero isotope limit, ...)
    InvalidConfig {
        message: String,
        key: Option<String>,
    },
    /// IO error (reading configuration or documents)
    IoError { message: String },
    /// Internal error
    InternalError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConversionError::InvalidConfig { message, key } => {
                if let Some(key) = key {
                    write!(f, "Invalid configuration for '{}': {}", key, message)
                } else {
                    write!(f, "Invalid configuration: {}", message)
                }
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConversionError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for fallible operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub message: String,
    /// Byte offset into the raw expression, when the issue has a position
    pub column: Option<usize>,
    pub suggestion: Option<String>,
}

impl ConversionWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            column: None,
            suggestion: None,
        }
    }

    pub fn at(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(c) = self.column {
            write!(f, "Warning at column {}: {}", c + 1, self.message)?;
        } else {
            write!(f, "Warning: {}", self.message)?;
        }
        if let Some(ref sug) = self.suggestion {
            write!(f, " ({})", sug)?;
        }
        Ok(())
    }
}

/// Formatter output with optional warnings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    /// The formatted content
    pub content: String,
    /// Any warnings generated while formatting
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<ConversionWarning>) -> Self {
        Self { content, warnings }
    }
}

// Convenience constructors for errors
impl ConversionError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ConversionError::InvalidConfig {
            message: message.into(),
            key: None,
        }
    }

    pub fn config_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConversionError::InvalidConfig {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConversionError::InternalError {
            message: message.into(),
        }
    }
}
