// Domain-level errors for the mirrored scene.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    // A coordinate was NaN or infinite.
    InvalidArgument,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidArgument => f.write_str("all coordinates must be finite numbers"),
        }
    }
}

impl std::error::Error for GeometryError {}

/// An inbound event whose payload does not have the expected shape.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadError {
    MissingArgument { index: usize },
    InvalidField { field: &'static str, reason: String },
}

impl PayloadError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PayloadError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::MissingArgument { index } => write!(f, "missing argument #{index}"),
            PayloadError::InvalidField { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

impl std::error::Error for PayloadError {}
