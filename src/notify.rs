use crate::models::Severity;
use chrono::{DateTime, Local};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);

/// Surface for transient user-visible messages.
pub trait Notifier: Send + Sync {
    fn notify_for(&self, message: &str, severity: Severity, duration: Duration);

    fn notify(&self, message: &str, severity: Severity) {
        self.notify_for(message, severity, DEFAULT_DURATION);
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
    pub created_at: DateTime<Local>,
}

impl Notification {
    pub fn css_class(&self) -> String {
        format!(
            "alert alert-{} alert-dismissible fade show position-fixed",
            self.severity
        )
    }
}

/// Holds the notifications currently attached to the page.
///
/// Each notification removes itself once its lifetime elapses; it can also be
/// dismissed earlier. Removal is idempotent.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    inner: Arc<CenterInner>,
}

#[derive(Default)]
struct CenterInner {
    next_id: AtomicU64,
    active: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, message: &str, severity: Severity, duration: Duration) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            message: message.to_string(),
            severity,
            duration,
            created_at: Local::now(),
        };
        info!(id, severity = %severity, "notification: {message}");
        self.active().push(notification);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let center = self.clone();
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    center.dismiss(id);
                });
            }
            Err(_) => warn!(id, "no runtime available, notification stays until dismissed"),
        }

        id
    }

    /// Removes the notification if it is still attached. Returns whether it was.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut active = self.active();
        match active.iter().position(|notification| notification.id == id) {
            Some(index) => {
                active.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.active().iter().any(|notification| notification.id == id)
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.active().clone()
    }

    pub fn len(&self) -> usize {
        self.active().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn active(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.inner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for NotificationCenter {
    fn notify_for(&self, message: &str, severity: Severity, duration: Duration) {
        self.show(message, severity, duration);
    }
}
