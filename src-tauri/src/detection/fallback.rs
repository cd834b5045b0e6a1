//! Locally simulated verdicts, used when the classification service fails

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{display_content, DetectionResult, Prediction, Sentiment};
use super::validator::AcceptedRequest;

/// Bounds of a simulated confidence score
pub const SIMULATED_CONFIDENCE_MIN: f64 = 65.0;
pub const SIMULATED_CONFIDENCE_MAX: f64 = 95.0;

/// Build a random verdict for a request the service could not classify
pub fn simulate_result<R: Rng>(request: &AcceptedRequest, rng: &mut R) -> DetectionResult {
    let prediction = if rng.gen_bool(0.5) {
        Prediction::Real
    } else {
        Prediction::Fake
    };

    // One decimal place, like a service-reported score
    let confidence = rng.gen_range(SIMULATED_CONFIDENCE_MIN..=SIMULATED_CONFIDENCE_MAX);
    let confidence = (confidence * 10.0).round() / 10.0;

    let sentiment = Sentiment::ALL
        .choose(rng)
        .copied()
        .unwrap_or_default();

    DetectionResult {
        prediction,
        confidence,
        sentiment,
        timestamp: Utc::now(),
        input_type: request.mode(),
        content: display_content(request.mode(), request.content()),
        simulated: true,
    }
}
