//! Result view derivation
//!
//! Turns a stored [`DetectionResult`] into the labels and sentences the
//! result view shows. Everything here is a pure function of the result.

use serde::Serialize;

use super::store::ResultStore;
use super::types::{DetectionResult, InputMode, Prediction, Sentiment};

/// Characters of submitted content shown in the preview
pub const PREVIEW_CHARS: usize = 200;

const HIGH_CONFIDENCE_MIN: f64 = 80.0;
const MODERATE_CONFIDENCE_MIN: f64 = 60.0;

const REAL_RECOMMENDATIONS: [&str; 4] = [
    "Content appears reliable based on linguistic analysis",
    "Safe to share with confidence",
    "Always verify critical facts with official sources",
    "Consider the source credibility independently",
];

const FAKE_RECOMMENDATIONS: [&str; 4] = [
    "Exercise caution before sharing this content",
    "Verify claims with authoritative sources",
    "Check publication date and author credentials",
    "Cross-reference facts with established news outlets",
];

/// Views the frontend can be sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Detect,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    /// Bands are inclusive at their lower bound
    pub fn for_confidence(confidence: f64) -> Self {
        if confidence >= HIGH_CONFIDENCE_MIN {
            Self::High
        } else if confidence >= MODERATE_CONFIDENCE_MIN {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "High confidence prediction",
            Self::Moderate => "Moderate confidence prediction",
            Self::Low => "Low confidence - recommendation: verify independently",
        }
    }
}

/// Styling hint for the recommendations card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Warning,
}

/// Everything the result view displays
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub prediction: Prediction,
    pub prediction_label: &'static str,
    /// "authentic" or "misinformation"
    pub verdict: &'static str,
    pub prediction_description: &'static str,
    pub confidence: f64,
    pub confidence_display: String,
    pub confidence_band: ConfidenceBand,
    pub confidence_description: &'static str,
    pub sentiment: Sentiment,
    pub sentiment_label: String,
    pub sentiment_description: &'static str,
    pub timestamp_display: String,
    pub content_preview: String,
    pub content_summary: String,
    pub recommendations: Vec<&'static str>,
    pub tone: Tone,
    pub simulated: bool,
}

/// Result view state: render the stored result or send the user back to the form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ResultPage {
    Redirect { to: Route },
    Rendered { view: ResultView },
}

/// Load the result view from the session store
pub fn load_result_page(store: &ResultStore) -> ResultPage {
    match store.take() {
        Ok(result) => ResultPage::Rendered {
            view: render(&result),
        },
        Err(_) => {
            tracing::debug!("No detection result stored, redirecting to detection view");
            ResultPage::Redirect { to: Route::Detect }
        }
    }
}

pub fn render(result: &DetectionResult) -> ResultView {
    let band = ConfidenceBand::for_confidence(result.confidence);

    ResultView {
        prediction: result.prediction,
        prediction_label: result.prediction.as_str(),
        verdict: verdict_word(result.prediction),
        prediction_description: prediction_description(result.prediction),
        confidence: result.confidence,
        confidence_display: format!("{:.1}%", result.confidence),
        confidence_band: band,
        confidence_description: band.description(),
        sentiment: result.sentiment,
        sentiment_label: result.sentiment.as_str().to_ascii_uppercase(),
        sentiment_description: sentiment_description(result.sentiment),
        timestamp_display: result.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        content_preview: content_preview(&result.content),
        content_summary: content_summary(result),
        recommendations: recommendations(result.prediction).to_vec(),
        tone: match result.prediction {
            Prediction::Real => Tone::Info,
            Prediction::Fake => Tone::Warning,
        },
        simulated: result.simulated,
    }
}

fn verdict_word(prediction: Prediction) -> &'static str {
    match prediction {
        Prediction::Real => "authentic",
        Prediction::Fake => "misinformation",
    }
}

fn prediction_description(prediction: Prediction) -> &'static str {
    match prediction {
        Prediction::Real => "This content appears to be AUTHENTIC based on linguistic analysis",
        Prediction::Fake => "This content shows signs of MISINFORMATION based on linguistic analysis",
    }
}

fn sentiment_description(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "High emotional charge detected - common in fake news",
        Sentiment::Negative => "Negative tone detected - may indicate sensationalism",
        Sentiment::Neutral => "Balanced tone - indicator of factual reporting",
    }
}

pub fn recommendations(prediction: Prediction) -> &'static [&'static str] {
    match prediction {
        Prediction::Real => &REAL_RECOMMENDATIONS,
        Prediction::Fake => &FAKE_RECOMMENDATIONS,
    }
}

/// First [`PREVIEW_CHARS`] characters, with an ellipsis only when truncated
pub fn content_preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

fn content_summary(result: &DetectionResult) -> String {
    match result.input_type {
        InputMode::Text => format!("{} characters analyzed", result.content.chars().count()),
        InputMode::Url => "URL analysis".to_string(),
    }
}
