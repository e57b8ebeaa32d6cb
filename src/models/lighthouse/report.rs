use crate::models::lighthouse::analysis::{Analysis, Recommendation};
use crate::models::lighthouse::audit::Audit;
use crate::models::lighthouse::category::{Categories, Scores};
use crate::models::lighthouse::metrics::Metrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// Root structure of the report printed by the audit engine
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawReport {
    pub requested_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighthouse_version: Option<String>,
    #[serde(default)]
    pub categories: Categories,
    #[serde(default)]
    pub audits: BTreeMap<String, Audit>,
}

/// Normalized result of auditing one URL. Persisted as
/// `lighthouse-report-<timestamp>.json`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub url: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub scores: Scores,
    pub metrics: Metrics,
    #[serde(default)]
    pub raw_audits: BTreeMap<String, Audit>,
    pub analysis: Analysis,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl AuditResult {
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// A URL that could not be audited.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AuditFailure {
    pub url: String,
    pub error: String,
    pub timestamp: i64,
}

impl fmt::Display for AuditFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.url, self.error)
    }
}

/// One entry of a batch, in input order.
pub type AuditOutcome = Result<AuditResult, AuditFailure>;
