//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are missing or empty.
    ///
    /// `fields` is the human-readable list used in the message, e.g. "Name and email".
    Required { fields: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { fields } => write!(f, "{} are required", fields),
        }
    }
}

impl std::error::Error for ValidationError {}
