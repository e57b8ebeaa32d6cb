use crate::cli::{HistoryArgs, HistoryFormat};
use crate::models::AuditResult;
use crate::services::report_service::ReportStore;
use crate::services::site_audit_service::compute_averages;
use crate::utils::render::{history_table, performance_chart, stats_table};
use crate::utils::{normalize_url, Config};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde_json::json;

/// Reports at or after `since` (epoch ms), optionally for one URL, oldest first.
pub fn select_reports(
    reports: Vec<AuditResult>,
    since: i64,
    url: Option<&str>,
) -> Vec<AuditResult> {
    reports
        .into_iter()
        .filter(|r| r.timestamp >= since)
        .filter(|r| url.map_or(true, |u| r.url == u))
        .collect()
}

/// Epoch-ms start of a window of `days` ending at `now`. A window reaching
/// past the representable range covers every report.
pub fn window_start(now: DateTime<Utc>, days: u32) -> i64 {
    Duration::try_days(i64::from(days))
        .and_then(|window| now.checked_sub_signed(window))
        .map_or(i64::MIN, |start| start.timestamp_millis())
}

pub async fn run_history(args: HistoryArgs, config: &Config) -> Result<i32> {
    let dir = args.output.unwrap_or_else(|| config.output_dir.clone());
    let store = ReportStore::new(&dir, config.history_capacity);
    let since = window_start(Utc::now(), args.days);
    let url = args.url.as_deref().map(normalize_url);

    let reports = store
        .scan()
        .await
        .with_context(|| format!("Failed to read reports from {}", dir.display()))?
        .into_iter()
        .map(|(_, report)| report)
        .collect();
    let reports = select_reports(reports, since, url.as_deref());

    match args.format {
        HistoryFormat::Table => {
            if reports.is_empty() {
                println!("No reports in the last {} days.", args.days);
            } else {
                println!("{}", history_table(&reports));
                println!("{}", stats_table(&compute_averages(&reports)));
            }
        }
        HistoryFormat::Json => {
            let body = json!({
                "days": args.days,
                "reports": reports,
                "stats": compute_averages(&reports),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        HistoryFormat::Chart => print!("{}", performance_chart(&reports)),
    }
    Ok(0)
}
