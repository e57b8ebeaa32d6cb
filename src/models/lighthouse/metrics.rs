use serde::{Deserialize, Serialize};
use std::fmt;

/// Named performance metrics of one audit. `None` means "not measured",
/// never zero.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cls: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fcp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tbt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttfb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tti: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused_css: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused_js: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unoptimized_images: Option<f64>,
}

/// Metrics that take part in run-to-run comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Lcp,
    Fid,
    Cls,
    Fcp,
    SpeedIndex,
    Tbt,
}

impl Metric {
    pub const COMPARED: [Metric; 6] = [
        Metric::Lcp,
        Metric::Fid,
        Metric::Cls,
        Metric::Fcp,
        Metric::SpeedIndex,
        Metric::Tbt,
    ];

    /// Key used in JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Lcp => "lcp",
            Metric::Fid => "fid",
            Metric::Cls => "cls",
            Metric::Fcp => "fcp",
            Metric::SpeedIndex => "speedIndex",
            Metric::Tbt => "tbt",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Metrics {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Lcp => self.lcp,
            Metric::Fid => self.fid,
            Metric::Cls => self.cls,
            Metric::Fcp => self.fcp,
            Metric::SpeedIndex => self.speed_index,
            Metric::Tbt => self.tbt,
        }
    }
}
