use crate::models::Severity;
use crate::notify::Notifier;
use std::future::Future;
use std::sync::Arc;
use tokio::task::AbortHandle;
use tracing::error;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please refresh the page.";

/// Page-wide handler for failures nothing else caught.
///
/// Background tasks spawned through [`ErrorReporter::spawn`] are watched; a
/// panic is logged and, when a notifier is attached, surfaced as a danger
/// notification. Cancelled tasks are not reported.
#[derive(Clone, Default)]
pub struct ErrorReporter {
    notifier: Option<Arc<dyn Notifier>>,
}

impl ErrorReporter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier: Some(notifier),
        }
    }

    /// A reporter that only logs.
    pub fn log_only() -> Self {
        Self::default()
    }

    pub fn report(&self, err: &dyn std::error::Error) {
        error!("unexpected error: {err}");
        if let Some(notifier) = &self.notifier {
            notifier.notify(UNEXPECTED_ERROR_MESSAGE, Severity::Danger);
        }
    }

    pub fn spawn<F>(&self, task: &'static str, future: F) -> AbortHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        let abort = handle.abort_handle();
        let reporter = self.clone();
        tokio::spawn(async move {
            if let Err(err) = handle.await {
                if err.is_panic() {
                    error!(task, "background task panicked");
                    reporter.report(&err);
                }
            }
        });
        abort
    }
}
