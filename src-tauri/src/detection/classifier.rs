//! Classification Service Client
//!
//! Talks to the remote FakeGuard prediction API. The service is treated as
//! untrusted: anything that does not parse into a complete verdict is an
//! error, and the dispatcher decides what to do with it.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::types::{InputMode, Prediction, Sentiment};
use super::validator::AcceptedRequest;
use crate::config::{DetectorConfig, HEALTH_PATH, PREDICT_PATH};
use crate::http_client::classifier_client;

/// Characters of an error response body kept for logging
const ERROR_BODY_CHARS: usize = 256;

/// Why a classification attempt produced no usable verdict
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("classification service unreachable: {0}")]
    Connect(String),

    #[error("classification request timed out")]
    Timeout,

    #[error("classification service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    MalformedBody(String),

    #[error("response missing or invalid field `{field}`")]
    SchemaMismatch { field: &'static str },
}

impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() || err.is_body() {
            Self::MalformedBody(err.to_string())
        } else {
            Self::Connect(err.to_string())
        }
    }
}

/// The fields the service is trusted to provide
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceVerdict {
    pub prediction: Prediction,
    pub confidence: f64,
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
}

/// JSON body sent to the predict endpoint
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PredictPayload<'a> {
    Text { text: &'a str },
    Url { url: &'a str },
}

impl<'a> PredictPayload<'a> {
    pub fn for_request(request: &'a AcceptedRequest) -> Self {
        match request.mode() {
            InputMode::Text => Self::Text {
                text: request.content(),
            },
            InputMode::Url => Self::Url {
                url: request.content(),
            },
        }
    }
}

/// Health report from the service's health endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub status: String,
    pub timestamp: String,
    #[serde(alias = "model_version")]
    pub model_version: String,
    #[serde(default)]
    pub uptime: Option<String>,
}

/// Remote classifier seam. The dispatcher only sees this trait.
#[async_trait]
pub trait ClassificationService: Send + Sync {
    async fn classify(&self, request: &AcceptedRequest) -> Result<ServiceVerdict, DispatchError>;
}

/// HTTP implementation backed by the shared reqwest client
pub struct HttpClassifier {
    client: Client,
    config: DetectorConfig,
}

impl HttpClassifier {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            client: classifier_client().clone(),
            config,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Probe the service's health endpoint
    pub async fn health(&self) -> Result<ServiceHealth, DispatchError> {
        let resp = self
            .client
            .get(self.config.endpoint(HEALTH_PATH))
            .timeout(self.config.request_timeout())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| DispatchError::MalformedBody(e.to_string()))
    }
}

#[async_trait]
impl ClassificationService for HttpClassifier {
    async fn classify(&self, request: &AcceptedRequest) -> Result<ServiceVerdict, DispatchError> {
        let url = self.config.endpoint(PREDICT_PATH);
        tracing::debug!(%url, mode = %request.mode(), "Sending classification request");

        let resp = self
            .client
            .post(&url)
            .timeout(self.config.request_timeout())
            .json(&PredictPayload::for_request(request))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }

        let body = resp.text().await?;
        parse_service_response(&body)
    }
}

/// Non-2xx response as an error, keeping only the start of the body
async fn status_error(resp: reqwest::Response) -> DispatchError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    DispatchError::Status {
        status,
        body: truncate_body(&body),
    }
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Parse a predict response body into a verdict
pub fn parse_service_response(body: &str) -> Result<ServiceVerdict, DispatchError> {
    #[derive(Deserialize)]
    struct RawVerdict {
        prediction: Option<String>,
        confidence: Option<Value>,
        sentiment: Option<String>,
        timestamp: Option<String>,
    }

    let raw: RawVerdict =
        serde_json::from_str(body).map_err(|e| DispatchError::MalformedBody(e.to_string()))?;

    let prediction = raw
        .prediction
        .as_deref()
        .and_then(Prediction::from_label)
        .ok_or(DispatchError::SchemaMismatch { field: "prediction" })?;

    let confidence = raw
        .confidence
        .as_ref()
        .and_then(parse_confidence)
        .ok_or(DispatchError::SchemaMismatch { field: "confidence" })?;

    // Unknown labels fall back to neutral, a missing field does not
    let sentiment = raw
        .sentiment
        .as_deref()
        .map(|label| Sentiment::from_label(Some(label)))
        .ok_or(DispatchError::SchemaMismatch { field: "sentiment" })?;

    let timestamp = raw
        .timestamp
        .as_deref()
        .and_then(parse_timestamp)
        .ok_or(DispatchError::SchemaMismatch { field: "timestamp" })?;

    Ok(ServiceVerdict {
        prediction,
        confidence,
        sentiment,
        timestamp,
    })
}

/// Confidence arrives as a number or as a numeric string ("87.3")
fn parse_confidence(value: &Value) -> Option<f64> {
    let confidence = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (confidence.is_finite() && (0.0..=100.0).contains(&confidence)).then_some(confidence)
}

/// RFC 3339, or a naive ISO-8601 date-time taken as UTC
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
