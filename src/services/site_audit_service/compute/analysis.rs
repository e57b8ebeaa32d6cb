use crate::models::{Analysis, Metrics, Scores};
use log::{debug, warn};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const CRITICAL_BELOW: f64 = 70.0;
const GOOD_FROM: f64 = 90.0;
// Upper bound on any list a model is allowed to return
const MAX_ITEMS: usize = 10;

const QUICK_WINS: [&str; 3] = [
    "Enable text compression (gzip or brotli) for HTML, CSS and JavaScript",
    "Serve images in modern formats (WebP/AVIF) with explicit width and height",
    "Defer non-critical JavaScript and inline the critical CSS",
];

const LONG_TERM: [&str; 3] = [
    "Serve static assets from a CDN with long-lived cache headers",
    "Code-split route bundles and lazy-load below-the-fold components",
    "Enforce performance budgets in CI so regressions fail the build",
];

/// Maps a performance score (0-100) to an urgency in `[1, 10]`.
pub fn priority_for(performance: f64) -> u8 {
    if performance < CRITICAL_BELOW {
        9
    } else if performance < GOOD_FROM {
        6
    } else {
        3
    }
}

fn summary_for(performance: f64) -> String {
    let shown = performance.round();
    if performance >= GOOD_FROM {
        format!(
            "Good performance ({}/100). Focus on keeping the current optimizations in place.",
            shown
        )
    } else if performance >= CRITICAL_BELOW {
        format!(
            "Performance needs improvement ({}/100). Several optimizations are available.",
            shown
        )
    } else {
        format!(
            "Poor performance ({}/100). Critical issues are hurting the user experience.",
            shown
        )
    }
}

fn critical_issues(performance: f64, metrics: &Metrics) -> Vec<String> {
    if performance >= CRITICAL_BELOW {
        return Vec::new();
    }

    let mut issues = vec![format!(
        "Performance score {}/100 is below {}",
        performance.round(),
        CRITICAL_BELOW
    )];
    if let Some(lcp) = metrics.lcp.filter(|v| *v > 2500.0) {
        issues.push(format!(
            "Largest Contentful Paint is {:.0} ms (target under 2500 ms)",
            lcp
        ));
    }
    if let Some(tbt) = metrics.tbt.filter(|v| *v > 300.0) {
        issues.push(format!(
            "Total Blocking Time is {:.0} ms (target under 300 ms)",
            tbt
        ));
    }
    if let Some(cls) = metrics.cls.filter(|v| *v > 0.1) {
        issues.push(format!(
            "Cumulative Layout Shift is {:.3} (target under 0.1)",
            cls
        ));
    }
    if let Some(ttfb) = metrics.ttfb.filter(|v| *v > 600.0) {
        issues.push(format!(
            "Server response time is {:.0} ms (target under 600 ms)",
            ttfb
        ));
    }
    issues
}

/// Deterministic, table-driven assessment.
pub fn analyze(scores: &Scores, metrics: &Metrics) -> Analysis {
    let performance = scores.performance * 100.0;
    Analysis {
        summary: summary_for(performance),
        critical_issues: critical_issues(performance, metrics),
        quick_wins: QUICK_WINS.iter().map(|s| s.to_string()).collect(),
        long_term_optimizations: LONG_TERM.iter().map(|s| s.to_string()).collect(),
        priority_score: priority_for(performance),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Serialize)]
struct ModelRequest<'a> {
    model: &'a str,
    scores: &'a Scores,
    metrics: &'a Metrics,
}

/// Asks an external model for the assessment. The response must carry the
/// same shape as [`Analysis`].
#[derive(Debug, Clone)]
pub struct ModelAdvisor {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl ModelAdvisor {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();
        ModelAdvisor {
            client,
            endpoint: endpoint.into(),
            api_key,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn request(&self, scores: &Scores, metrics: &Metrics) -> Result<Analysis, AdvisorError> {
        let mut request = self.client.post(&self.endpoint).json(&ModelRequest {
            model: &self.model,
            scores,
            metrics,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let analysis: Analysis = response.json().await?;
        Ok(bound(analysis))
    }
}

fn bound(mut analysis: Analysis) -> Analysis {
    analysis.critical_issues.truncate(MAX_ITEMS);
    analysis.quick_wins.truncate(MAX_ITEMS);
    analysis.long_term_optimizations.truncate(MAX_ITEMS);
    analysis.priority_score = analysis.priority_score.clamp(1, 10);
    analysis
}

/// Produces the [`Analysis`] attached to every audit result.
#[derive(Debug, Clone, Default)]
pub enum Analyzer {
    #[default]
    Table,
    Model(ModelAdvisor),
}

impl Analyzer {
    pub async fn analyze(&self, scores: &Scores, metrics: &Metrics) -> Analysis {
        match self {
            Analyzer::Table => analyze(scores, metrics),
            Analyzer::Model(advisor) => match advisor.request(scores, metrics).await {
                Ok(analysis) => {
                    debug!("analysis provided by model {}", advisor.model());
                    analysis
                }
                Err(e) => {
                    warn!("model analysis unavailable, using table: {}", e);
                    analyze(scores, metrics)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(performance: f64) -> Scores {
        Scores {
            performance,
            accessibility: 1.0,
            best_practices: 1.0,
            seo: 1.0,
        }
    }

    #[test]
    fn poor_score_is_urgent_with_critical_issues() {
        let metrics = Metrics {
            lcp: Some(4100.0),
            ..Default::default()
        };
        let analysis = analyze(&scores(0.66), &metrics);

        assert_eq!(analysis.priority_score, 9);
        assert!(!analysis.critical_issues.is_empty());
        assert!(analysis.critical_issues.iter().any(|i| i.contains("4100 ms")));
        assert!(analysis.summary.starts_with("Poor performance"));
    }

    #[test]
    fn good_score_has_no_critical_issues() {
        let analysis = analyze(&scores(0.95), &Metrics::default());

        assert_eq!(analysis.priority_score, 3);
        assert!(analysis.critical_issues.is_empty());
        assert_eq!(analysis.quick_wins.len(), 3);
        assert_eq!(analysis.long_term_optimizations.len(), 3);
    }

    #[test]
    fn priority_steps_down_at_thresholds() {
        assert_eq!(priority_for(65.0), 9);
        assert_eq!(priority_for(80.0), 6);
        assert_eq!(priority_for(95.0), 3);
        assert_eq!(analyze(&scores(0.7), &Metrics::default()).priority_score, 6);
        assert_eq!(analyze(&scores(0.9), &Metrics::default()).priority_score, 3);

        let mut last = u8::MAX;
        for step in 0..=100 {
            let p = priority_for(step as f64);
            assert!(p <= last);
            last = p;
        }
    }

    #[test]
    fn model_output_is_bounded() {
        let analysis = bound(Analysis {
            summary: "x".to_string(),
            critical_issues: vec!["a".to_string(); 25],
            quick_wins: vec![],
            long_term_optimizations: vec![],
            priority_score: 42,
        });

        assert_eq!(analysis.critical_issues.len(), MAX_ITEMS);
        assert_eq!(analysis.priority_score, 10);
    }

    #[tokio::test]
    async fn unreachable_model_falls_back_to_table() {
        // Nothing listens on port 9 on the loopback interface.
        let analyzer = Analyzer::Model(ModelAdvisor::new("http://127.0.0.1:9/analyze", None, "any"));
        let s = scores(0.66);

        let analysis = analyzer.analyze(&s, &Metrics::default()).await;

        assert_eq!(analysis, analyze(&s, &Metrics::default()));
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(end) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= end + 4 + length
    }

    /// Answers a single HTTP request with `body` and hands back what was sent.
    async fn serve_once(body: String) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request_complete(&request) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{}/analyze", addr), handle)
    }

    #[tokio::test]
    async fn model_answer_is_parsed_and_bounded() {
        let issues: Vec<String> = (0..25).map(|i| format!("issue {}", i)).collect();
        let body = serde_json::json!({
            "summary": "Render-blocking scripts dominate.",
            "criticalIssues": issues,
            "quickWins": ["Defer analytics"],
            "longTermOptimizations": [],
            "priorityScore": 42
        })
        .to_string();
        let (endpoint, server) = serve_once(body).await;
        let advisor = ModelAdvisor::new(endpoint, Some("secret".to_string()), "perf-model");

        let analysis = advisor
            .request(&scores(0.55), &Metrics::default())
            .await
            .unwrap();

        assert_eq!(analysis.summary, "Render-blocking scripts dominate.");
        assert_eq!(analysis.critical_issues.len(), 10);
        assert_eq!(analysis.critical_issues[9], "issue 9");
        assert_eq!(analysis.quick_wins, vec!["Defer analytics".to_string()]);
        assert_eq!(analysis.priority_score, 10);

        let sent = server.await.unwrap().to_lowercase();
        assert!(sent.starts_with("post /analyze"));
        assert!(sent.contains("bearer secret"));
        assert!(sent.contains("\"model\":\"perf-model\""));
        assert!(sent.contains("\"performance\":0.55"));
    }
}
