use serde::{Deserialize, Serialize};
use std::fmt;

/// Totals reported by `GET /api/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SummaryData {
    pub pcs_total: f64,
    pub services_total: f64,
    pub expenses_total: f64,
    pub total_all: f64,
    #[serde(default)]
    pub pcs_count: u64,
    #[serde(default)]
    pub services_count: u64,
    #[serde(default)]
    pub expenses_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
