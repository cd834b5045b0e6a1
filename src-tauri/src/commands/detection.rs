//! Tauri commands for the detection pipeline
//!
//! The detection view calls `submit_detection` and navigates to the route it
//! returns. The result view calls `load_result_page` and either renders the
//! view model or follows the redirect.

use tauri::{AppHandle, Emitter, State};

use crate::detection::{
    validate, DetectionPipeline, DetectionRequest, DetectionResult, InputMode, ResultPage,
    ServiceHealth, SubmissionOutcome,
};

/// Emitted with `true` once a valid submission is dispatched and with the
/// current busy state when it settles
pub const BUSY_EVENT: &str = "detection:busy";

/// Check a submission without dispatching it, for inline form feedback
#[tauri::command]
pub fn validate_submission(mode: InputMode, content: String) -> Result<(), String> {
    validate(&DetectionRequest::new(mode, content))
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Validate, classify and store one submission
#[tauri::command]
pub async fn submit_detection(
    app: AppHandle,
    pipeline: State<'_, DetectionPipeline>,
    mode: InputMode,
    content: String,
) -> Result<SubmissionOutcome, String> {
    let request = DetectionRequest::new(mode, content);

    let outcome = pipeline
        .submit_with(request, || {
            let _ = app.emit(BUSY_EVENT, true);
        })
        .await;
    let _ = app.emit(BUSY_EVENT, pipeline.is_busy());

    outcome.map_err(|e| e.to_string())
}

/// Whether a submission is in flight (the submit button stays disabled)
#[tauri::command]
pub fn is_detection_busy(pipeline: State<'_, DetectionPipeline>) -> bool {
    pipeline.is_busy()
}

/// Result view state: the rendered result, or a redirect to the form
#[tauri::command]
pub fn load_result_page(pipeline: State<'_, DetectionPipeline>) -> ResultPage {
    pipeline.result_page()
}

/// Raw stored result
#[tauri::command]
pub fn get_detection_result(
    pipeline: State<'_, DetectionPipeline>,
) -> Result<DetectionResult, String> {
    pipeline.store().take().map_err(|e| e.to_string())
}

/// Forget the stored result
#[tauri::command]
pub fn clear_detection_result(pipeline: State<'_, DetectionPipeline>) {
    pipeline.store().clear();
}

/// Probe the classification service's health endpoint
#[tauri::command]
pub async fn get_service_health(
    pipeline: State<'_, DetectionPipeline>,
) -> Result<ServiceHealth, String> {
    let classifier = pipeline
        .http_classifier()
        .ok_or("Classification service not configured")?;

    classifier.health().await.map_err(|e| {
        tracing::warn!(base_url = %classifier.config().base_url, "Health check failed: {}", e);
        e.to_string()
    })
}
