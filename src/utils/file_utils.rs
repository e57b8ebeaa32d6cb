use serde::Serialize;
use std::io;
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

const REPORT_PREFIX: &str = "lighthouse-report-";

pub fn report_file_name(timestamp: i64) -> String {
    format!("{}{}.json", REPORT_PREFIX, timestamp)
}

/// Epoch-ms timestamp encoded in a report file name, if it is one.
pub fn report_timestamp(file_name: &str) -> Option<i64> {
    file_name
        .strip_prefix(REPORT_PREFIX)?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

/// Writes `value` as pretty JSON to a file that must not exist yet.
/// Fails with `AlreadyExists` instead of replacing an earlier file.
pub async fn create_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(json.as_bytes()).await?;
    file.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_names_round_trip() {
        let name = report_file_name(1_712_000_000_123);
        assert_eq!(name, "lighthouse-report-1712000000123.json");
        assert_eq!(report_timestamp(&name), Some(1_712_000_000_123));
    }

    #[test]
    fn foreign_files_are_not_reports() {
        assert_eq!(report_timestamp("lighthouse-summary-1.json"), None);
        assert_eq!(report_timestamp("lighthouse-report-abc.json"), None);
        assert_eq!(report_timestamp("lighthouse-report-12.html"), None);
    }

    #[tokio::test]
    async fn create_json_never_replaces_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.json");

        create_json(&path, &serde_json::json!({"n": 1})).await.unwrap();
        let err = create_json(&path, &serde_json::json!({"n": 2}))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"n\": 1"));
    }
}
