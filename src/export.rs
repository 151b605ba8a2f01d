use crate::errors::ClientError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub const DEFAULT_EXPORT_NAME: &str = "export.csv";

/// Serializes records to CSV. Headers come from the first record's keys;
/// string values are double-quoted, null or missing values are left empty.
pub fn to_csv(rows: &[Map<String, Value>]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&String> = first.keys().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| header.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|header| csv_cell(row.get(header.as_str())))
            .collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => format!("\"{text}\""),
        Some(other) => other.to_string(),
    }
}

/// Writes `content` into `dir` under `filename`, creating the directory.
pub async fn download_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, ClientError> {
    fs::create_dir_all(dir).await?;
    let path = dir.join(filename);
    fs::write(&path, content).await?;
    info!(path = %path.display(), bytes = content.len(), "file downloaded");
    Ok(path)
}

pub async fn export_to_csv(
    dir: &Path,
    rows: &[Map<String, Value>],
    filename: Option<&str>,
) -> Result<PathBuf, ClientError> {
    let content = to_csv(rows);
    download_file(dir, filename.unwrap_or(DEFAULT_EXPORT_NAME), &content).await
}
