pub mod chart;
pub mod csv;
pub mod html;
pub mod table;

use crate::models::{AuditFailure, AuditOutcome, AuditResult};
use serde::Serialize;

pub use chart::performance_chart;
pub use csv::summary_csv;
pub use html::summary_html;
pub use table::{comparison_table, history_table, score_table, stats_table};

/// A batch entry as written to JSON: either a full result or an error record.
#[derive(Serialize)]
#[serde(untagged)]
pub enum SummaryEntry<'a> {
    Audited(&'a AuditResult),
    Failed(&'a AuditFailure),
}

pub fn summary_json(outcomes: &[AuditOutcome]) -> serde_json::Result<String> {
    let entries: Vec<SummaryEntry> = outcomes
        .iter()
        .map(|o| match o {
            Ok(r) => SummaryEntry::Audited(r),
            Err(f) => SummaryEntry::Failed(f),
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}
