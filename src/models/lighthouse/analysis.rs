use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse assessment of one audit.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub summary: String,
    pub critical_issues: Vec<String>,
    pub quick_wins: Vec<String>,
    pub long_term_optimizations: Vec<String>,
    /// 1 (nothing urgent) to 10 (fix now).
    pub priority_score: u8,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let priority_str = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        write!(f, "{}", priority_str)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub implementation: String,
    pub estimated_impact: String,
}
