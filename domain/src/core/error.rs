//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User does not have a startup profile.")]
    MissingStartupProfile,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_profile_display() {
        let error = DomainError::MissingStartupProfile;
        assert_eq!(error.to_string(), "User does not have a startup profile.");
    }

    #[test]
    fn test_invalid_input_display() {
        let error = DomainError::InvalidInput("idea cannot be empty".to_string());
        assert_eq!(error.to_string(), "Invalid input: idea cannot be empty");
    }
}
