use serde::{Deserialize, Serialize};
use serde_json::Value;

// pub struct for individual audit results as emitted by the audit engine
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Audit {
    /// `details.overallSavingsBytes`, reported by the opportunity audits.
    pub fn savings_bytes(&self) -> Option<f64> {
        self.details
            .as_ref()?
            .get("overallSavingsBytes")?
            .as_f64()
    }
}
