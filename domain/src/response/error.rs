//! Structured response error types

use thiserror::Error;

/// User-facing message for unparsable model output.
pub const FORMAT_ERROR_MESSAGE: &str =
    "The AI returned a response in an unexpected format. Please try again.";

/// User-facing message for well-formed JSON of the wrong shape.
pub const SHAPE_MISMATCH_MESSAGE: &str =
    "The AI returned an unexpected response. Please try again.";

/// The JSON candidate recovered from model output could not be parsed.
///
/// `Display` is always the fixed, user-readable message; the candidate and
/// the parser's complaint are kept for diagnostics only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", FORMAT_ERROR_MESSAGE)]
pub struct ResponseFormatError {
    candidate: String,
    detail: String,
}

impl ResponseFormatError {
    pub fn new(candidate: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            detail: detail.into(),
        }
    }

    /// The substring that failed to parse
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    /// The JSON parser's error message
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Valid JSON that is neither the success nor the clarification shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", SHAPE_MISMATCH_MESSAGE)]
pub struct ShapeMismatch {
    feature: &'static str,
    detail: String,
}

impl ShapeMismatch {
    pub fn new(feature: &'static str, detail: impl Into<String>) -> Self {
        Self {
            feature,
            detail: detail.into(),
        }
    }

    /// Payload type name the value was checked against
    pub fn feature(&self) -> &'static str {
        self.feature
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Either failure mode of turning model text into a [`super::StructuredResult`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error(transparent)]
    Format(#[from] ResponseFormatError),

    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatch),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display_hides_candidate() {
        let err = ResponseFormatError::new("{oops", "EOF while parsing");
        assert_eq!(err.to_string(), FORMAT_ERROR_MESSAGE);
        assert_eq!(err.candidate(), "{oops");
        assert_eq!(err.detail(), "EOF while parsing");
    }

    #[test]
    fn test_response_error_is_transparent() {
        let err: ResponseError = ShapeMismatch::new("NewsExplanation", "no discriminant").into();
        assert!(matches!(err, ResponseError::ShapeMismatch(_)));
        assert_eq!(err.to_string(), SHAPE_MISMATCH_MESSAGE);
    }
}
