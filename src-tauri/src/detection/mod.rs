//! Detection pipeline
//!
//! ```text
//! validate ──▶ dispatch ──▶ store.put ──▶ (navigate) ──▶ store.take ──▶ render
//!    │            │
//!    │            └─ service failure: simulated verdict, same path onward
//!    └─ empty / too short / URL: reported inline, nothing dispatched
//! ```

pub mod classifier;
pub mod dispatcher;
pub mod fallback;
pub mod render;
pub mod store;
pub mod types;
pub mod validator;

pub use classifier::{ClassificationService, HttpClassifier, ServiceHealth};
pub use dispatcher::{DispatchRejected, Dispatcher};
pub use render::{load_result_page, render, ResultPage, ResultView, Route};
pub use store::{ResultStore, StoreError};
pub use types::{DetectionRequest, DetectionResult, InputMode, Prediction, Sentiment};
pub use validator::{validate, ValidationError};

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Rejected(#[from] DispatchRejected),
}

/// What the detection view does after a successful submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub result: DetectionResult,
    pub navigate_to: Route,
}

/// Validator, dispatcher and store wired together for one app session
pub struct DetectionPipeline {
    dispatcher: Dispatcher,
    http: Option<Arc<HttpClassifier>>,
}

impl DetectionPipeline {
    /// Pipeline backed by the HTTP classification service
    pub fn with_http(classifier: HttpClassifier) -> Self {
        let classifier = Arc::new(classifier);
        let mut pipeline = Self::new(classifier.clone());
        pipeline.http = Some(classifier);
        pipeline
    }

    pub fn new(service: Arc<dyn ClassificationService>) -> Self {
        Self {
            dispatcher: Dispatcher::new(service, Arc::new(ResultStore::new())),
            http: None,
        }
    }

    pub fn store(&self) -> &ResultStore {
        self.dispatcher.store()
    }

    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// HTTP client for the health probe, when the pipeline is backed by one
    pub fn http_classifier(&self) -> Option<&HttpClassifier> {
        self.http.as_deref()
    }

    /// Validate, dispatch and store one submission
    pub async fn submit(&self, request: DetectionRequest) -> Result<SubmissionOutcome, SubmitError> {
        self.submit_with(request, || {}).await
    }

    /// Like [`submit`](Self::submit), calling `on_dispatch` once validation
    /// has passed and before the service is contacted
    pub async fn submit_with(
        &self,
        request: DetectionRequest,
        on_dispatch: impl FnOnce(),
    ) -> Result<SubmissionOutcome, SubmitError> {
        let accepted = validate(&request).map_err(|e| {
            tracing::debug!(mode = %request.mode, error = %e, "Submission rejected by validation");
            e
        })?;

        on_dispatch();
        let result = self.dispatcher.dispatch(accepted).await?;

        Ok(SubmissionOutcome {
            result,
            navigate_to: Route::Results,
        })
    }

    /// State of the result view for the current session
    pub fn result_page(&self) -> ResultPage {
        load_result_page(self.store())
    }
}

#[cfg(test)]
mod tests {
    use super::classifier::{DispatchError, ServiceVerdict};
    use super::validator::AcceptedRequest;
    use super::*;
    use crate::config::DetectorConfig;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and always fails, like an unreachable service
    #[derive(Default)]
    struct CountingService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ClassificationService for CountingService {
        async fn classify(&self, _request: &AcceptedRequest) -> Result<ServiceVerdict, DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DispatchError::Connect("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_short_text_never_dispatched() {
        let service = Arc::new(CountingService::default());
        let pipeline = DetectionPipeline::new(service.clone());

        for len in 0..20 {
            let text = "n".repeat(len);
            let err = pipeline.submit(DetectionRequest::text(text)).await.unwrap_err();
            if len == 0 {
                assert_eq!(err, SubmitError::Invalid(ValidationError::EmptyInput(InputMode::Text)));
            } else {
                assert_eq!(err, SubmitError::Invalid(ValidationError::TooShort { chars: len }));
            }
        }

        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.store().take(), Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_dispatch_hook_runs_only_for_valid_input() {
        let pipeline = DetectionPipeline::new(Arc::new(CountingService::default()));
        let hooked = AtomicUsize::new(0);

        let rejected = [
            DetectionRequest::text("too short"),
            DetectionRequest::text("   "),
            DetectionRequest::url("https://example.com/story"),
        ];
        for request in rejected {
            let outcome = pipeline
                .submit_with(request, || {
                    hooked.fetch_add(1, Ordering::SeqCst);
                })
                .await;
            assert!(matches!(outcome, Err(SubmitError::Invalid(_))));
        }
        assert_eq!(hooked.load(Ordering::SeqCst), 0);

        pipeline
            .submit_with(
                DetectionRequest::text("Local council approves budget for new library."),
                || {
                    hooked.fetch_add(1, Ordering::SeqCst);
                },
            )
            .await
            .unwrap();
        assert_eq!(hooked.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_url_mode_never_dispatched() {
        let service = Arc::new(CountingService::default());
        let pipeline = DetectionPipeline::new(service.clone());

        let urls = [
            "https://example.com/news/2025/01/27/policy-announcement",
            "http://short.io",
            "Government announces new environmental policy today.",
        ];
        for url in urls {
            let err = pipeline.submit(DetectionRequest::url(url)).await.unwrap_err();
            assert_eq!(err, SubmitError::Invalid(ValidationError::FeatureDisabled));
        }

        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.store().take(), Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_scenario_unreachable_service_still_navigates() {
        // Nothing listens on port 1
        let classifier = HttpClassifier::new(DetectorConfig::with_base_url("http://127.0.0.1:1"));
        let pipeline = DetectionPipeline::with_http(classifier);

        let outcome = pipeline
            .submit(DetectionRequest::text(
                "Government announces new environmental policy today.",
            ))
            .await
            .unwrap();

        assert_eq!(outcome.navigate_to, Route::Results);
        assert_eq!(outcome.result.input_type, InputMode::Text);
        assert!((65.0..=95.0).contains(&outcome.result.confidence));
        assert!(outcome.result.simulated);
        assert!(!pipeline.is_busy());

        match pipeline.result_page() {
            ResultPage::Rendered { view } => assert_eq!(view, render(&outcome.result)),
            other => panic!("expected rendered result page, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scenario_silent_service_times_out_into_fallback() {
        use std::time::Duration;
        use tokio::net::TcpListener;

        // Accepts the connection and never writes a response
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        let config = DetectorConfig::with_base_url(format!("http://{}", addr))
            .with_timeout(Duration::from_millis(200));
        let pipeline = DetectionPipeline::with_http(HttpClassifier::new(config));

        let outcome = pipeline
            .submit(DetectionRequest::text(
                "Scientists confirm the bridge reopening was delayed by a week.",
            ))
            .await
            .unwrap();

        assert!(outcome.result.simulated);
        assert!((65.0..=95.0).contains(&outcome.result.confidence));
        assert_eq!(outcome.navigate_to, Route::Results);
        assert_eq!(pipeline.store().take().unwrap(), outcome.result);
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn test_scenario_short_text_stores_nothing() {
        let pipeline = DetectionPipeline::new(Arc::new(CountingService::default()));

        let err = pipeline.submit(DetectionRequest::text("short")).await.unwrap_err();
        assert_eq!(err, SubmitError::Invalid(ValidationError::TooShort { chars: 5 }));
        assert_eq!(pipeline.store().take(), Err(StoreError::NotFound));
    }

    #[test]
    fn test_scenario_missing_result_redirects() {
        let pipeline = DetectionPipeline::new(Arc::new(CountingService::default()));
        assert_eq!(
            pipeline.result_page(),
            ResultPage::Redirect { to: Route::Detect }
        );
    }

    #[tokio::test]
    async fn test_every_result_is_in_range() {
        let pipeline = DetectionPipeline::new(Arc::new(CountingService::default()));

        for i in 0..50 {
            let text = format!("Breaking report number {} on regional infrastructure spending.", i);
            let outcome = pipeline.submit(DetectionRequest::text(text)).await.unwrap();
            let result = outcome.result;
            assert!((0.0..=100.0).contains(&result.confidence));
            assert!(matches!(result.prediction, Prediction::Real | Prediction::Fake));
            assert_eq!(pipeline.store().take().unwrap(), result);
        }
    }
}
