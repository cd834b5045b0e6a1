//! Input validation for detection submissions
//!
//! Runs synchronously before anything is dispatched. A request that passes
//! comes back as an [`AcceptedRequest`], the only type the dispatcher takes.

use thiserror::Error;

use super::types::{DetectionRequest, InputMode};

/// Minimum trimmed length of a text submission, in characters
pub const MIN_TEXT_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter {}", missing_input_noun(.0))]
    EmptyInput(InputMode),

    #[error("News text must be at least {} characters long", MIN_TEXT_CHARS)]
    TooShort { chars: usize },

    /// URL analysis is visible in the form but not enabled yet
    #[error("URL analysis will be available in the MVP version")]
    FeatureDisabled,
}

fn missing_input_noun(mode: &InputMode) -> &'static str {
    match mode {
        InputMode::Text => "news text",
        InputMode::Url => "a URL",
    }
}

/// A submission that passed validation. Content is already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedRequest {
    mode: InputMode,
    content: String,
}

impl AcceptedRequest {
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Check a submission against the rules for its mode
pub fn validate(request: &DetectionRequest) -> Result<AcceptedRequest, ValidationError> {
    let content = request.content.trim();

    if content.is_empty() {
        return Err(ValidationError::EmptyInput(request.mode));
    }

    match request.mode {
        InputMode::Text => {
            let chars = content.chars().count();
            if chars < MIN_TEXT_CHARS {
                return Err(ValidationError::TooShort { chars });
            }
        }
        InputMode::Url => return Err(ValidationError::FeatureDisabled),
    }

    Ok(AcceptedRequest {
        mode: request.mode,
        content: content.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn accept_unchecked(mode: InputMode, content: &str) -> AcceptedRequest {
    AcceptedRequest {
        mode,
        content: content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_rejected_in_both_modes() {
        assert_eq!(
            validate(&DetectionRequest::text("   \n\t")),
            Err(ValidationError::EmptyInput(InputMode::Text))
        );
        assert_eq!(
            validate(&DetectionRequest::url("")),
            Err(ValidationError::EmptyInput(InputMode::Url))
        );
    }

    #[test]
    fn test_short_text_rejected() {
        assert_eq!(
            validate(&DetectionRequest::text("short")),
            Err(ValidationError::TooShort { chars: 5 })
        );

        // 19 characters once the padding is trimmed
        let padded = format!("   {}   ", "a".repeat(19));
        assert_eq!(
            validate(&DetectionRequest::text(padded)),
            Err(ValidationError::TooShort { chars: 19 })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 19 two-byte characters is still too short
        let text = "é".repeat(19);
        assert!(matches!(
            validate(&DetectionRequest::text(text)),
            Err(ValidationError::TooShort { chars: 19 })
        ));
    }

    #[test]
    fn test_text_at_minimum_is_accepted_and_trimmed() {
        let text = format!("  {}  ", "b".repeat(MIN_TEXT_CHARS));
        let accepted = validate(&DetectionRequest::text(text)).unwrap();
        assert_eq!(accepted.mode(), InputMode::Text);
        assert_eq!(accepted.content(), "b".repeat(MIN_TEXT_CHARS));
    }

    #[test]
    fn test_url_mode_is_disabled() {
        for url in ["https://example.com/news/article-1", "not even a url", "x"] {
            assert_eq!(
                validate(&DetectionRequest::url(url)),
                Err(ValidationError::FeatureDisabled)
            );
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::EmptyInput(InputMode::Text).to_string(),
            "Please enter news text"
        );
        assert_eq!(
            ValidationError::EmptyInput(InputMode::Url).to_string(),
            "Please enter a URL"
        );
        assert_eq!(
            ValidationError::TooShort { chars: 3 }.to_string(),
            "News text must be at least 20 characters long"
        );
    }
}
