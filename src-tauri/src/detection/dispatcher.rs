//! Submission Dispatcher
//!
//! Sends one accepted request to the classification service and always comes
//! back with a result. When the service fails for any reason the verdict is
//! simulated locally and flagged `simulated`. Either way the result is written
//! to the [`ResultStore`] before it is returned.
//!
//! One submission may be in flight at a time. A second `dispatch` while the
//! first is pending is rejected without touching the service or the store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use super::classifier::ClassificationService;
use super::fallback::simulate_result;
use super::store::ResultStore;
use super::types::{display_content, DetectionResult};
use super::validator::AcceptedRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchRejected {
    #[error("An analysis is already in progress")]
    Busy,
}

pub struct Dispatcher {
    service: Arc<dyn ClassificationService>,
    store: Arc<ResultStore>,
    busy: Arc<AtomicBool>,
}

/// Clears the busy flag on every exit path
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Dispatcher {
    pub fn new(service: Arc<dyn ClassificationService>, store: Arc<ResultStore>) -> Self {
        Self {
            service,
            store,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn store(&self) -> &Arc<ResultStore> {
        &self.store
    }

    /// Whether a submission is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Classify a request, falling back to a simulated verdict on failure
    pub async fn dispatch(&self, request: AcceptedRequest) -> Result<DetectionResult, DispatchRejected> {
        let _guard = BusyGuard::acquire(&self.busy).ok_or(DispatchRejected::Busy)?;

        let result = match self.service.classify(&request).await {
            Ok(verdict) => {
                tracing::info!(
                    prediction = verdict.prediction.as_str(),
                    confidence = verdict.confidence,
                    sentiment = verdict.sentiment.as_str(),
                    "Classification received"
                );
                DetectionResult {
                    prediction: verdict.prediction,
                    confidence: verdict.confidence,
                    sentiment: verdict.sentiment,
                    timestamp: verdict.timestamp,
                    input_type: request.mode(),
                    content: display_content(request.mode(), request.content()),
                    simulated: false,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Classification service failed, using simulated verdict");
                let mut rng = rand::thread_rng();
                simulate_result(&request, &mut rng)
            }
        };

        self.store.put(result.clone());
        Ok(result)
    }
}
