use crate::models::{AuditResult, AverageReport, CategoriesStats, ScoreStats};
use std::collections::HashMap;

pub fn compute_score_stats(scores: &mut [f64]) -> Option<ScoreStats> {
    if scores.is_empty() {
        return None;
    }
    scores.sort_by(|a, b| a.total_cmp(b));

    let count = scores.len();
    let sum: f64 = scores.iter().sum();
    let mean = sum / count as f64;

    let variance = scores.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / count as f64;
    let std_dev = variance.sqrt();

    let median = if count % 2 == 0 {
        (scores[count / 2 - 1] + scores[count / 2]) / 2.0
    } else {
        scores[count / 2]
    };

    Some(ScoreStats {
        min: scores[0],
        max: scores[count - 1],
        median,
        std_dev,
    })
}

pub fn compute_averages(reports: &[AuditResult]) -> AverageReport {
    let mut scores: HashMap<&str, Vec<f64>> = HashMap::new();
    let mut audit_fails: HashMap<&str, u32> = HashMap::new();
    let mut best_page: (Option<&str>, f64) = (None, f64::MIN);
    let mut worst_page: (Option<&str>, f64) = (None, f64::MAX);

    for report in reports {
        for (key, score) in report.scores.entries() {
            scores.entry(key).or_default().push(score);
        }

        let performance = report.scores.performance;
        if performance > best_page.1 {
            best_page = (Some(&report.url), performance);
        }
        if performance < worst_page.1 {
            worst_page = (Some(&report.url), performance);
        }

        // Track common failing audits (score < 0.5)
        for (audit_name, audit) in &report.raw_audits {
            if audit.score.is_some_and(|s| s < 0.5) {
                *audit_fails.entry(audit_name.as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut compute_stat = |key: &str| {
        scores
            .get_mut(key)
            .and_then(|values| compute_score_stats(values))
    };

    // Most frequent first, ties by name so output is stable
    let mut sorted_audits: Vec<_> = audit_fails.into_iter().collect();
    sorted_audits.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    AverageReport {
        report_count: reports.len(),
        category_stats: CategoriesStats {
            performance: compute_stat("performance"),
            accessibility: compute_stat("accessibility"),
            best_practices: compute_stat("bestPractices"),
            seo: compute_stat("seo"),
        },
        best_performance_page: best_page.0.map(str::to_string),
        worst_performance_page: worst_page.0.map(str::to_string),
        common_failing_audits: sorted_audits
            .into_iter()
            .take(5)
            .map(|(name, _)| name.to_string())
            .collect(),
    }
}
