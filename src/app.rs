use crate::config::ClientConfig;
use crate::dashboard::{DashboardRefresher, RefreshHandle, SummaryClient};
use crate::errors::ClientError;
use crate::export::export_to_csv;
use crate::form::FormSubmitter;
use crate::notify::Notifier;
use crate::page::{Page, SharedPage};
use crate::supervise::ErrorReporter;
use crate::theme::{ColorScheme, ThemeSync};
use reqwest::Client;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// The behaviour layer wired onto one page.
pub struct App {
    page: SharedPage,
    notifier: Arc<dyn Notifier>,
    reporter: ErrorReporter,
    export_dir: PathBuf,
    refresher: DashboardRefresher,
    submitter: FormSubmitter,
    refresh: Option<RefreshHandle>,
    theme: Option<ThemeSync>,
}

impl App {
    pub async fn initialize(
        config: &ClientConfig,
        page: Page,
        color_scheme: watch::Receiver<ColorScheme>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ClientError> {
        let http = Client::new();
        let on_dashboard = page.is_dashboard();
        let page = page.into_shared();
        let reporter = ErrorReporter::new(Arc::clone(&notifier));

        let summary = SummaryClient::new(http.clone(), &config.base_url)?;
        let refresher = DashboardRefresher::new(summary, Arc::clone(&page))
            .with_period(config.refresh_period)
            .with_reporter(reporter.clone());
        let submitter = FormSubmitter::new(http, config.base_url.clone(), Arc::clone(&notifier));

        let theme = ThemeSync::start(Arc::clone(&page), color_scheme, &reporter).await;
        let refresh = if on_dashboard {
            Some(refresher.start()?)
        } else {
            None
        };

        info!(base_url = %config.base_url, auto_refresh = on_dashboard, "cafe dashboard initialized");
        Ok(Self {
            page,
            notifier,
            reporter,
            export_dir: config.export_dir.clone(),
            refresher,
            submitter,
            refresh,
            theme: Some(theme),
        })
    }

    pub fn page(&self) -> SharedPage {
        Arc::clone(&self.page)
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    pub fn submitter(&self) -> &FormSubmitter {
        &self.submitter
    }

    pub fn refresher(&self) -> &DashboardRefresher {
        &self.refresher
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    /// Page-wide handler; background tasks spawned through it report panics here too.
    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    pub fn report_unexpected(&self, err: &dyn std::error::Error) {
        self.reporter.report(err);
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Exports records as CSV into the configured export directory.
    pub async fn export_csv(
        &self,
        rows: &[Map<String, Value>],
        filename: Option<&str>,
    ) -> Result<PathBuf, ClientError> {
        export_to_csv(&self.export_dir, rows, filename).await
    }

    pub fn teardown(&mut self) {
        if let Some(handle) = self.refresh.take() {
            handle.stop();
        }
        if let Some(theme) = self.theme.take() {
            theme.stop();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use crate::notify::NotificationCenter;
    use crate::supervise::UNEXPECTED_ERROR_MESSAGE;
    use crate::theme::DARK_THEME_CLASS;
    use serde_json::json;
    use std::time::Duration;

    fn config() -> ClientConfig {
        config_with_export_dir(PathBuf::from("exports"))
    }

    fn config_with_export_dir(dir: PathBuf) -> ClientConfig {
        ClientConfig::from_lookup(move |key| match key {
            "DASHBOARD_BASE_URL" => Some("http://127.0.0.1:9".to_string()),
            "DASHBOARD_EXPORT_DIR" => Some(dir.to_string_lossy().to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn refresh_starts_only_on_dashboard() {
        let center = Arc::new(NotificationCenter::new());
        let (_tx, rx) = watch::channel(ColorScheme::Light);

        let mut app = App::initialize(&config(), Page::dashboard(), rx.clone(), center.clone())
            .await
            .unwrap();
        assert!(app.is_refreshing());
        assert!(app.refresher().is_running());
        app.teardown();
        assert!(!app.is_refreshing());
        assert!(!app.refresher().is_running());

        let other = App::initialize(&config(), Page::new("/expenses"), rx, center)
            .await
            .unwrap();
        assert!(!other.is_refreshing());
    }

    #[tokio::test]
    async fn initial_theme_is_applied() {
        let center = Arc::new(NotificationCenter::new());
        let (_tx, rx) = watch::channel(ColorScheme::Dark);
        let app = App::initialize(&config(), Page::new("/history"), rx, center)
            .await
            .unwrap();
        assert!(app.page().lock().await.has_body_class(DARK_THEME_CLASS));
    }

    #[tokio::test]
    async fn unexpected_errors_surface_as_danger_notification() {
        let center = Arc::new(NotificationCenter::new());
        let (_tx, rx) = watch::channel(ColorScheme::Light);
        let app = App::initialize(&config(), Page::new("/services"), rx, center.clone())
            .await
            .unwrap();

        let err = std::io::Error::other("boom");
        app.report_unexpected(&err);

        let shown = center.snapshot();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].severity, Severity::Danger);
        assert_eq!(shown[0].message, UNEXPECTED_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn panics_in_app_tasks_reach_the_notifier() {
        let center = Arc::new(NotificationCenter::new());
        let (_tx, rx) = watch::channel(ColorScheme::Light);
        let app = App::initialize(&config(), Page::new("/services"), rx, center.clone())
            .await
            .unwrap();

        app.reporter().spawn("card-summary", async { panic!("bad card state") });
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while center.is_empty() {
            assert!(tokio::time::Instant::now() < deadline, "panic was not reported");
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(center.snapshot()[0].message, UNEXPECTED_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn csv_export_lands_in_configured_directory() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("cafe_dashboard_app_export_{nanos}"));
        let center = Arc::new(NotificationCenter::new());
        let (_tx, rx) = watch::channel(ColorScheme::Light);
        let app = App::initialize(&config_with_export_dir(dir.clone()), Page::new("/history"), rx, center)
            .await
            .unwrap();

        let rows = match json!({"pc": "PC-2", "cost": 15}) {
            Value::Object(map) => vec![map],
            _ => unreachable!(),
        };
        let path = app.export_csv(&rows, Some("pcs.csv")).await.unwrap();

        assert_eq!(app.export_dir(), dir.as_path());
        assert_eq!(path, dir.join("pcs.csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "pc,cost\n\"PC-2\",15");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
