use crate::models::AuditOutcome;

fn field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn summary_csv(outcomes: &[AuditOutcome]) -> String {
    let mut out = String::from(
        "url,timestamp,performance,accessibility,bestPractices,seo,lcp,fid,cls,fcp,speedIndex,tbt,ttfb,priorityScore,error\n",
    );
    for outcome in outcomes {
        let row = match outcome {
            Ok(r) => vec![
                field(&r.url),
                r.timestamp.to_string(),
                r.scores.performance.to_string(),
                r.scores.accessibility.to_string(),
                r.scores.best_practices.to_string(),
                r.scores.seo.to_string(),
                number(r.metrics.lcp),
                number(r.metrics.fid),
                number(r.metrics.cls),
                number(r.metrics.fcp),
                number(r.metrics.speed_index),
                number(r.metrics.tbt),
                number(r.metrics.ttfb),
                r.analysis.priority_score.to_string(),
                String::new(),
            ],
            Err(f) => {
                let mut row = vec![field(&f.url), f.timestamp.to_string()];
                row.extend(std::iter::repeat(String::new()).take(12));
                row.push(field(&f.error));
                row
            }
        };
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
