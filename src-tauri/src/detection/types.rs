//! Detection data types shared by the validator, dispatcher, store and renderer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the user submitted content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Text,
    Url,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Url => write!(f, "url"),
        }
    }
}

/// A raw submission from the detection form, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRequest {
    pub mode: InputMode,
    pub content: String,
}

impl DetectionRequest {
    pub fn new(mode: InputMode, content: impl Into<String>) -> Self {
        Self {
            mode,
            content: content.into(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(InputMode::Text, content)
    }

    pub fn url(content: impl Into<String>) -> Self {
        Self::new(InputMode::Url, content)
    }
}

/// Classification verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Prediction {
    Real,
    Fake,
}

impl Prediction {
    /// Parse a service label, ignoring case
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "REAL" => Some(Self::Real),
            "FAKE" => Some(Self::Fake),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "REAL",
            Self::Fake => "FAKE",
        }
    }
}

/// Emotional tone reported alongside the verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    /// Map a free-form label onto a sentiment. Absent or unknown labels are neutral.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("positive") => Self::Positive,
            Some("negative") => Self::Negative,
            _ => Self::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// Outcome of one submission, as handed from the detection view to the result view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub prediction: Prediction,
    /// Percentage in [0, 100]
    pub confidence: f64,
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
    pub input_type: InputMode,
    /// Submitted text, or `URL: <address>` for URL submissions
    pub content: String,
    /// Set when the verdict was synthesized locally because the service failed
    #[serde(default)]
    pub simulated: bool,
}

/// Display form of submitted content stored on the result
pub fn display_content(mode: InputMode, content: &str) -> String {
    match mode {
        InputMode::Text => content.to_string(),
        InputMode::Url => format!("URL: {}", content),
    }
}
