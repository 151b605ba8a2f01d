use crate::dashboard::REFRESH_PERIOD;
use crate::errors::ClientError;
use reqwest::Url;
use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub refresh_period: Duration,
    pub store_path: PathBuf,
    pub export_dir: PathBuf,
    pub start_path: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let raw_url = lookup("DASHBOARD_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url).map_err(|err| ClientError::invalid_url(&raw_url, err))?;

        let refresh_period = lookup("DASHBOARD_REFRESH_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(REFRESH_PERIOD);

        let store_path = lookup("DASHBOARD_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/local_store.json"));
        let export_dir = lookup("DASHBOARD_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("exports"));
        let start_path = lookup("DASHBOARD_START_PATH").unwrap_or_else(|| "/".to_string());

        Ok(Self {
            base_url,
            refresh_period,
            store_path,
            export_dir,
            start_path,
        })
    }
}
