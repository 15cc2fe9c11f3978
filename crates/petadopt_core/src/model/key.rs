//! Shared parse error for typed lookup keys.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection produced when a string key/value pair cannot become a typed key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    /// The key does not name a queryable field.
    UnknownKey(String),
    /// The value cannot be read as the field's type.
    InvalidValue { key: &'static str, value: String },
}

impl Display for KeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "unknown lookup key `{key}`"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for lookup key `{key}`")
            }
        }
    }
}

impl Error for KeyParseError {}
