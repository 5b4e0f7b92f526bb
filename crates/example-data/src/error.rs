//! Error types for the example-data crate.
//!
//! Generation failures are reported as semantic enums following the
//! project's error handling conventions with `thiserror`.

use thiserror::Error;

/// Errors that can occur during user generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request asked for zero users.
    #[error("example user request must ask for at least one user")]
    EmptyRequest,

    /// The requested count does not fit the identifier range.
    #[error("cannot generate {requested} users: identifiers would overflow")]
    TooManyUsers {
        /// Number of users requested.
        requested: usize,
    },

    /// Failed to generate a valid name after maximum retries.
    #[error("failed to generate valid name after {max_attempts} attempts")]
    NameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// A generated email address failed validation.
    #[error("generated email address is invalid: {email}")]
    InvalidEmail {
        /// The rejected address.
        email: String,
    },

    /// A timestamp fell outside the representable range.
    #[error("generated {field} timestamp is out of range")]
    TimestampOutOfRange {
        /// Name of the timestamp field being generated.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_formats_correctly() {
        assert_eq!(
            GenerationError::EmptyRequest.to_string(),
            "example user request must ask for at least one user"
        );
    }

    #[test]
    fn name_generation_failure_formats_correctly() {
        let err = GenerationError::NameGenerationFailed { max_attempts: 100 };
        assert_eq!(
            err.to_string(),
            "failed to generate valid name after 100 attempts"
        );
    }

    #[test]
    fn timestamp_error_names_the_field() {
        let err = GenerationError::TimestampOutOfRange {
            field: "lastActivity",
        };
        assert_eq!(
            err.to_string(),
            "generated lastActivity timestamp is out of range"
        );
    }
}
