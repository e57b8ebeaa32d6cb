use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct ScoreDelta {
    pub current: f64,
    pub previous: f64,
    pub change: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricDelta {
    pub current: f64,
    pub previous: f64,
    pub change: f64,
    pub percent_change: f64,
}

/// Difference between two audits of the same URL. Computed on demand,
/// never persisted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ComparisonResult {
    /// Performance score on the 0-100 scale.
    pub performance: ScoreDelta,
    /// Keyed by `Metric::key`. Metrics that cannot be compared are absent.
    pub metrics: BTreeMap<String, MetricDelta>,
}
