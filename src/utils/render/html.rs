use crate::models::AuditOutcome;
use crate::utils::render::table::{metric_value, percent};
use crate::models::Metric;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn score_cell(score: f64) -> String {
    let class = if score >= 0.9 {
        "good"
    } else if score >= 0.5 {
        "average"
    } else {
        "poor"
    };
    format!("<td class=\"{}\">{}</td>", class, percent(score))
}

pub fn summary_html(outcomes: &[AuditOutcome], generated_at: &str) -> String {
    let mut rows = String::new();
    for outcome in outcomes {
        match outcome {
            Ok(r) => {
                let issues = if r.analysis.critical_issues.is_empty() {
                    String::new()
                } else {
                    format!(
                        "<ul>{}</ul>",
                        r.analysis
                            .critical_issues
                            .iter()
                            .map(|i| format!("<li>{}</li>", escape(i)))
                            .collect::<String>()
                    )
                };
                rows.push_str(&format!(
                    "        <tr>
            <td><a href=\"{url}\">{url}</a></td>
            {perf}{a11y}{bp}{seo}
            <td>{lcp}</td>
            <td>{cls}</td>
            <td>{tbt}</td>
            <td>{summary}{issues}</td>
        </tr>
",
                    url = escape(&r.url),
                    perf = score_cell(r.scores.performance),
                    a11y = score_cell(r.scores.accessibility),
                    bp = score_cell(r.scores.best_practices),
                    seo = score_cell(r.scores.seo),
                    lcp = metric_value(Metric::Lcp, r.metrics.lcp),
                    cls = metric_value(Metric::Cls, r.metrics.cls),
                    tbt = metric_value(Metric::Tbt, r.metrics.tbt),
                    summary = escape(&r.analysis.summary),
                    issues = issues,
                ));
            }
            Err(f) => rows.push_str(&format!(
                "        <tr class=\"failed\">
            <td>{}</td>
            <td colspan=\"8\">Audit failed: {}</td>
        </tr>
",
                escape(&f.url),
                escape(&f.error)
            )),
        }
    }

    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"UTF-8\">
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
    <title>Lighthouse Audit Summary</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; color: #2d3748; margin: 2rem; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border-bottom: 1px solid #e2e8f0; padding: 8px; text-align: left; vertical-align: top; }}
        th {{ background: #f8fafc; }}
        .good {{ color: #0c6b3a; font-weight: bold; }}
        .average {{ color: #b7791f; font-weight: bold; }}
        .poor {{ color: #c53030; font-weight: bold; }}
        .failed td {{ color: #c53030; }}
    </style>
</head>
<body>
    <h1>Lighthouse Audit Summary</h1>
    <p>Generated {}</p>
    <table>
        <tr>
            <th>URL</th><th>Perf</th><th>A11y</th><th>BP</th><th>SEO</th>
            <th>LCP</th><th>CLS</th><th>TBT</th><th>Assessment</th>
        </tr>
{}    </table>
</body>
</html>
",
        escape(generated_at),
        rows
    )
}
