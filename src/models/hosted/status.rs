use serde::{Deserialize, Serialize};
use std::fmt;

// Hosted test status
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HostedStatus {
    Queued,
    Running,
    Completed,
    Error,
}

impl fmt::Display for HostedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            HostedStatus::Queued => "queued",
            HostedStatus::Running => "running",
            HostedStatus::Completed => "completed",
            HostedStatus::Error => "error",
        };
        write!(f, "{}", status_str)
    }
}

// Body posted to the hosted audit API
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HostedTestRequest {
    pub url: String,
    pub regions: Vec<String>,
}

// Response for a submitted hosted test
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HostedTestResponse {
    pub test_id: String,
    pub status: HostedStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
}
