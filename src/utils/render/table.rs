use crate::models::{AuditOutcome, AuditResult, AverageReport, ComparisonResult, Metric, ScoreStats};

/// Plain-text table with left-aligned, space-padded columns.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = line(&self.headers);
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }
}

pub fn percent(score: f64) -> String {
    format!("{:.0}", score * 100.0)
}

pub fn metric_value(metric: Metric, value: Option<f64>) -> String {
    match (metric, value) {
        (_, None) => "-".to_string(),
        (Metric::Cls, Some(v)) => format!("{:.3}", v),
        (_, Some(v)) => format!("{:.0} ms", v),
    }
}

fn signed(v: f64, decimals: usize) -> String {
    format!("{:+.*}", decimals, v)
}

pub fn score_table(outcomes: &[AuditOutcome]) -> String {
    let mut table = Table::new(["URL", "Perf", "A11y", "BP", "SEO", "LCP", "CLS", "TBT", "Status"]);
    for outcome in outcomes {
        match outcome {
            Ok(r) => table.row([
                r.url.clone(),
                percent(r.scores.performance),
                percent(r.scores.accessibility),
                percent(r.scores.best_practices),
                percent(r.scores.seo),
                metric_value(Metric::Lcp, r.metrics.lcp),
                metric_value(Metric::Cls, r.metrics.cls),
                metric_value(Metric::Tbt, r.metrics.tbt),
                format!("priority {}", r.analysis.priority_score),
            ]),
            Err(f) => table.row([
                f.url.clone(),
                "-".into(),
                "-".into(),
                "-".into(),
                "-".into(),
                "-".into(),
                "-".into(),
                "-".into(),
                format!("FAILED: {}", f.error),
            ]),
        }
    }
    table.render()
}

pub fn comparison_table(cmp: &ComparisonResult) -> String {
    let mut table = Table::new(["Metric", "Previous", "Current", "Change", "Change %"]);
    table.row([
        "performance".to_string(),
        format!("{:.1}", cmp.performance.previous),
        format!("{:.1}", cmp.performance.current),
        signed(cmp.performance.change, 1),
        "-".to_string(),
    ]);
    for metric in Metric::COMPARED {
        let Some(delta) = cmp.metrics.get(metric.key()) else {
            continue;
        };
        let decimals = if metric == Metric::Cls { 3 } else { 0 };
        table.row([
            metric.key().to_string(),
            metric_value(metric, Some(delta.previous)),
            metric_value(metric, Some(delta.current)),
            signed(delta.change, decimals),
            format!("{}%", signed(delta.percent_change, 1)),
        ]);
    }
    table.render()
}

pub fn history_table(reports: &[AuditResult]) -> String {
    let mut table = Table::new(["Date", "URL", "Perf", "A11y", "BP", "SEO", "LCP", "CLS"]);
    for r in reports {
        let date = r
            .fetched_at()
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| r.timestamp.to_string());
        table.row([
            date,
            r.url.clone(),
            percent(r.scores.performance),
            percent(r.scores.accessibility),
            percent(r.scores.best_practices),
            percent(r.scores.seo),
            metric_value(Metric::Lcp, r.metrics.lcp),
            metric_value(Metric::Cls, r.metrics.cls),
        ]);
    }
    table.render()
}

pub fn stats_table(avg: &AverageReport) -> String {
    let mut table = Table::new(["Category", "Min", "Median", "Max", "Std dev"]);
    let stats = &avg.category_stats;
    let categories: [(&str, Option<ScoreStats>); 4] = [
        ("performance", stats.performance),
        ("accessibility", stats.accessibility),
        ("best practices", stats.best_practices),
        ("seo", stats.seo),
    ];
    for (name, stat) in categories {
        if let Some(s) = stat {
            table.row([
                name.to_string(),
                percent(s.min),
                percent(s.median),
                percent(s.max),
                format!("{:.1}", s.std_dev * 100.0),
            ]);
        }
    }

    let mut out = table.render();
    if let Some(best) = &avg.best_performance_page {
        out.push_str(&format!("Best performance:  {}\n", best));
    }
    if let Some(worst) = &avg.worst_performance_page {
        out.push_str(&format!("Worst performance: {}\n", worst));
    }
    if !avg.common_failing_audits.is_empty() {
        out.push_str(&format!(
            "Common failing audits: {}\n",
            avg.common_failing_audits.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetricDelta, ScoreDelta};
    use std::collections::BTreeMap;

    #[test]
    fn pads_columns_to_widest_cell() {
        let mut table = Table::new(["A", "Bee"]);
        table.row(["long cell", "x"]);

        let out = table.render();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "A          Bee");
        assert_eq!(lines[1], "-".repeat(14));
        assert_eq!(lines[2], "long cell  x");
    }

    #[test]
    fn comparison_rows_show_signed_changes() {
        let mut metrics = BTreeMap::new();
        metrics.insert(
            "lcp".to_string(),
            MetricDelta {
                current: 1800.0,
                previous: 2400.0,
                change: -600.0,
                percent_change: -25.0,
            },
        );
        let cmp = ComparisonResult {
            performance: ScoreDelta {
                current: 92.0,
                previous: 81.0,
                change: 11.0,
            },
            metrics,
        };

        let out = comparison_table(&cmp);

        assert!(out.contains("+11.0"));
        assert!(out.contains("-600"));
        assert!(out.contains("-25.0%"));
        assert!(!out.contains("cls"));
    }
}
