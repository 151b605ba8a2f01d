pub mod app;
pub mod busy;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod export;
pub mod form;
pub mod format;
pub mod models;
pub mod notify;
pub mod page;
pub mod print;
pub mod shortcuts;
pub mod storage;
pub mod supervise;
pub mod theme;
pub mod validation;

pub use app::App;
pub use config::ClientConfig;
pub use dashboard::{DashboardRefresher, RefreshHandle, SummaryClient};
pub use errors::{ClientError, ErrorKind};
pub use form::{Form, FormField, FormSubmitter, SubmitHooks, SubmitOutcome};
pub use models::{Severity, SummaryData};
pub use notify::{NotificationCenter, Notifier};
pub use page::{Page, SummaryField};
pub use supervise::ErrorReporter;
