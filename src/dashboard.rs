use crate::errors::ClientError;
use crate::models::SummaryData;
use crate::page::SharedPage;
use crate::supervise::ErrorReporter;
use reqwest::{Client, Url};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info};

pub const SUMMARY_PATH: &str = "/api/summary";
pub const REFRESH_PERIOD: Duration = Duration::from_secs(30);

pub struct SummaryClient {
    http: Client,
    url: Url,
}

impl SummaryClient {
    pub fn new(http: Client, base_url: &Url) -> Result<Self, ClientError> {
        let url = base_url
            .join(SUMMARY_PATH)
            .map_err(|err| ClientError::invalid_url(SUMMARY_PATH, err))?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches the summary. A non-success status yields `Ok(None)`.
    pub async fn fetch(&self) -> Result<Option<SummaryData>, ClientError> {
        let response = self.http.get(self.url.clone()).send().await?;
        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), "summary request not ok, skipping tick");
            return Ok(None);
        }
        let summary = response.json::<SummaryData>().await?;
        Ok(Some(summary))
    }
}

/// Periodically pulls `/api/summary` and projects it onto the page's summary cards.
#[derive(Clone)]
pub struct DashboardRefresher {
    client: Arc<SummaryClient>,
    page: SharedPage,
    period: Duration,
    running: Arc<AtomicBool>,
    reporter: ErrorReporter,
}

impl DashboardRefresher {
    pub fn new(client: SummaryClient, page: SharedPage) -> Self {
        Self {
            client: Arc::new(client),
            page,
            period: REFRESH_PERIOD,
            running: Arc::new(AtomicBool::new(false)),
            reporter: ErrorReporter::log_only(),
        }
    }

    pub fn with_reporter(mut self, reporter: ErrorReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Starts the refresh cycle. The first tick fires one period after start.
    ///
    /// Only one cycle may run per refresher; a second call while the returned
    /// handle is alive fails with `AlreadyRunning`. A zero period is rejected.
    pub fn start(&self) -> Result<RefreshHandle, ClientError> {
        if self.period.is_zero() {
            return Err(ClientError::invalid_period());
        }
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ClientError::already_running());
        }

        let refresher = self.clone();
        let period = self.period;
        let task = self.reporter.spawn("dashboard-refresh", async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // Ticks are independent; a slow fetch may overlap the next one.
                let tick = refresher.clone();
                refresher.reporter.spawn("dashboard-tick", async move {
                    tick.refresh().await;
                });
            }
        });

        info!(url = %self.client.url(), period_secs = period.as_secs_f64(), "dashboard auto-refresh started");
        Ok(RefreshHandle {
            task,
            running: Arc::clone(&self.running),
        })
    }

    /// Runs one tick. Returns true when at least one card was updated.
    pub async fn refresh(&self) -> bool {
        match self.client.fetch().await {
            Ok(Some(summary)) => {
                let updated = self.page.lock().await.summary_mut().apply(&summary);
                debug!(updated, total = summary.total_all, "dashboard cards refreshed");
                updated > 0
            }
            Ok(None) => false,
            Err(err) => {
                error!("error refreshing dashboard data: {err}");
                false
            }
        }
    }
}

/// Owned handle to a running refresh cycle. Dropping it stops the cycle.
///
/// Stopping only prevents future ticks; a fetch already in flight completes.
pub struct RefreshHandle {
    task: AbortHandle,
    running: Arc<AtomicBool>,
}

impl RefreshHandle {
    pub fn stop(self) {
        drop(self);
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
        if self.running.swap(false, Ordering::SeqCst) {
            info!("dashboard auto-refresh stopped");
        }
    }
}
