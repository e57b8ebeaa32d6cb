use crate::models::{Audit, Metrics};
use std::collections::BTreeMap;

fn numeric(audits: &BTreeMap<String, Audit>, id: &str) -> Option<f64> {
    audits
        .get(id)
        .and_then(|a| a.numeric_value)
        .filter(|v| v.is_finite())
}

fn savings(audits: &BTreeMap<String, Audit>, id: &str) -> Option<f64> {
    audits
        .get(id)
        .and_then(Audit::savings_bytes)
        .filter(|v| v.is_finite())
}

/// Pulls the named performance metrics out of the engine's audit map.
/// Audits the engine did not report come back as `None`.
pub fn extract_metrics(audits: &BTreeMap<String, Audit>) -> Metrics {
    Metrics {
        lcp: numeric(audits, "largest-contentful-paint"),
        fid: numeric(audits, "max-potential-fid"),
        cls: numeric(audits, "cumulative-layout-shift"),
        fcp: numeric(audits, "first-contentful-paint"),
        speed_index: numeric(audits, "speed-index"),
        tbt: numeric(audits, "total-blocking-time"),
        ttfb: numeric(audits, "server-response-time"),
        tti: numeric(audits, "interactive"),
        unused_css: savings(audits, "unused-css-rules"),
        unused_js: savings(audits, "unused-javascript"),
        unoptimized_images: savings(audits, "uses-optimized-images"),
    }
}
