use crate::models::{AuditResult, ComparisonResult, Metric, MetricDelta, ScoreDelta};
use log::warn;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("reports are for different URLs: {current} vs {previous}")]
    UrlMismatch { current: String, previous: String },
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn metric_delta(current: Option<f64>, previous: Option<f64>) -> Option<MetricDelta> {
    let (current, previous) = (current?, previous?);
    if previous == 0.0 {
        return None;
    }
    let change = current - previous;
    let percent_change = change / previous * 100.0;
    percent_change.is_finite().then_some(MetricDelta {
        current,
        previous,
        change,
        percent_change,
    })
}

fn diff(current: &AuditResult, previous: &AuditResult) -> ComparisonResult {
    let current_perf = current.scores.performance * 100.0;
    let previous_perf = previous.scores.performance * 100.0;

    let metrics: BTreeMap<String, MetricDelta> = Metric::COMPARED
        .iter()
        .filter_map(|&m| {
            metric_delta(current.metrics.get(m), previous.metrics.get(m))
                .map(|d| (m.key().to_string(), d))
        })
        .collect();

    ComparisonResult {
        performance: ScoreDelta {
            current: round1(current_perf),
            previous: round1(previous_perf),
            change: round1(current_perf - previous_perf),
        },
        metrics,
    }
}

/// Diffs `current` against `previous`. Returns `None` when there is no
/// previous run. A metric missing from either run, or whose previous value
/// is zero, is left out of `metrics`.
pub fn compare(current: &AuditResult, previous: Option<&AuditResult>) -> Option<ComparisonResult> {
    let previous = previous?;
    if current.url != previous.url {
        warn!(
            "comparing reports for different URLs ({} vs {})",
            current.url, previous.url
        );
    }
    Some(diff(current, previous))
}

/// Like [`compare`], but refuses reports for different URLs.
pub fn compare_checked(
    current: &AuditResult,
    previous: &AuditResult,
) -> Result<ComparisonResult, CompareError> {
    if current.url != previous.url {
        return Err(CompareError::UrlMismatch {
            current: current.url.clone(),
            previous: previous.url.clone(),
        });
    }
    Ok(diff(current, previous))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Analysis, Metrics, Scores};
    use std::collections::BTreeMap;

    fn result(performance: f64, metrics: Metrics) -> AuditResult {
        AuditResult {
            url: "https://example.test/".to_string(),
            timestamp: 1_700_000_000_000,
            scores: Scores {
                performance,
                ..Default::default()
            },
            metrics,
            raw_audits: BTreeMap::new(),
            analysis: Analysis::default(),
            recommendations: vec![],
        }
    }

    #[test]
    fn no_previous_run_yields_none() {
        assert!(compare(&result(0.9, Metrics::default()), None).is_none());
    }

    #[test]
    fn computes_deltas_and_percentages() {
        let current = result(
            0.92,
            Metrics {
                lcp: Some(1800.0),
                cls: Some(0.02),
                ..Default::default()
            },
        );
        let previous = result(
            0.81,
            Metrics {
                lcp: Some(2400.0),
                cls: Some(0.04),
                ..Default::default()
            },
        );

        let cmp = compare(&current, Some(&previous)).unwrap();

        assert_eq!(cmp.performance.current, 92.0);
        assert_eq!(cmp.performance.previous, 81.0);
        assert_eq!(cmp.performance.change, 11.0);
        let lcp = cmp.metrics["lcp"];
        assert_eq!(lcp.change, -600.0);
        assert_eq!(lcp.percent_change, -25.0);
        assert!((cmp.metrics["cls"].percent_change + 50.0).abs() < 1e-9);
    }

    #[test]
    fn skips_unmeasured_and_zero_baselines() {
        let current = result(
            0.5,
            Metrics {
                lcp: Some(1000.0),
                tbt: Some(120.0),
                fcp: Some(900.0),
                ..Default::default()
            },
        );
        let previous = result(
            0.5,
            Metrics {
                lcp: None,
                tbt: Some(0.0),
                fcp: Some(1000.0),
                ..Default::default()
            },
        );

        let cmp = compare(&current, Some(&previous)).unwrap();

        assert!(!cmp.metrics.contains_key("lcp"));
        assert!(!cmp.metrics.contains_key("tbt"));
        assert!(cmp.metrics.contains_key("fcp"));
        let json = serde_json::to_string(&cmp).unwrap();
        assert!(!json.contains("NaN") && !json.contains("inf"));
    }

    #[test]
    fn change_is_antisymmetric() {
        let a = result(
            0.73,
            Metrics {
                lcp: Some(3100.5),
                fid: Some(130.0),
                cls: Some(0.17),
                speed_index: Some(4200.0),
                ..Default::default()
            },
        );
        let b = result(
            0.61,
            Metrics {
                lcp: Some(2750.25),
                fid: Some(210.0),
                cls: Some(0.031),
                speed_index: Some(3900.0),
                ..Default::default()
            },
        );

        let ab = compare(&a, Some(&b)).unwrap();
        let ba = compare(&b, Some(&a)).unwrap();

        assert_eq!(ab.performance.change, -ba.performance.change);
        for (key, delta) in &ab.metrics {
            assert_eq!(delta.change, -ba.metrics[key].change, "metric {}", key);
        }
    }

    #[test]
    fn checked_compare_rejects_other_urls() {
        let current = result(0.9, Metrics::default());
        let mut previous = result(0.8, Metrics::default());
        previous.url = "https://other.test/".to_string();

        assert!(matches!(
            compare_checked(&current, &previous),
            Err(CompareError::UrlMismatch { .. })
        ));
    }
}
