//! Error types for hardware port operations.
//!
//! This module defines error types specific to the hardware ports the lock
//! controller drives, covering misconfigured pins, unsupported operations
//! and plain I/O failures.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur while driving a hardware port.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Operation is not supported by this port implementation.
    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: String },

    /// The pin is not configured for the requested operation.
    #[error("Pin not configured: {message}")]
    NotConfigured { message: String },

    /// A read from an input pin failed.
    #[error("Read error: {message}")]
    ReadError { message: String },

    /// A write to an output pin failed.
    #[error("Write error: {message}")]
    WriteError { message: String },

    /// An out-of-range value was passed to a port.
    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl HardwareError {
    /// Create a new unsupported operation error.
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Create a new not-configured error.
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::NotConfigured {
            message: message.into(),
        }
    }

    /// Create a new read error.
    pub fn read(message: impl Into<String>) -> Self {
        Self::ReadError {
            message: message.into(),
        }
    }

    /// Create a new write error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::WriteError {
            message: message.into(),
        }
    }

    /// Create a new invalid value error.
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidValue {
            message: message.into(),
        }
    }

    /// Create a generic error with custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
