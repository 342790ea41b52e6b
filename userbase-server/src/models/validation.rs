//! Validation error types

use std::fmt;

/// Validation error for incoming user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is absent, empty, or whitespace only
    Blank { field: &'static str },

    /// Field is present but not a string
    NotAString { field: &'static str },

    /// Request body could not be parsed at all
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank { field } => write!(f, "{} cannot be blank", capitalize(field)),
            Self::NotAString { field } => write!(f, "{} must be a string", capitalize(field)),
            Self::MalformedBody { reason } => write!(f, "Malformed request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Blank { field: "name" };
        assert_eq!(err.to_string(), "Name cannot be blank");

        let err = ValidationError::NotAString { field: "name" };
        assert_eq!(err.to_string(), "Name must be a string");
    }

    #[test]
    fn malformed_body_includes_reason() {
        let err = ValidationError::MalformedBody {
            reason: "expected value at line 1 column 1".into(),
        };
        assert!(err.to_string().starts_with("Malformed request body"));
        assert!(err.to_string().contains("line 1 column 1"));
    }
}
