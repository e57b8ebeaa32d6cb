use crate::models::AuditResult;

const BAR_WIDTH: usize = 40;

/// ASCII bar chart of performance scores, one bar per report.
pub fn performance_chart(reports: &[AuditResult]) -> String {
    if reports.is_empty() {
        return "No reports.\n".to_string();
    }

    let label_width = reports.iter().map(|r| r.url.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for r in reports {
        let date = r
            .fetched_at()
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| r.timestamp.to_string());
        let filled = (r.scores.performance * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "{}  {:<lw$}  {}{} {:>3}\n",
            date,
            r.url,
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
            (r.scores.performance * 100.0).round(),
            lw = label_width
        ));
    }
    out
}
