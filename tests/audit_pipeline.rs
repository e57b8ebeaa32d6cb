use lightaudit::cli::handler::audit::{audit_with, ci_violations, compare_with_previous, exit_code};
use lightaudit::cli::{AuditArgs, ReportFormat};
use lightaudit::models::RawReport;
use lightaudit::services::report_service::ReportStore;
use lightaudit::services::site_audit_service::{AuditEngine, AuditError, AuditRunner, Analyzer};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Answers from a fixed script instead of launching a browser.
struct ScriptedEngine {
    pages: HashMap<String, (f64, f64, f64)>,
    // URL -> number of failures before it starts succeeding
    flaky: Mutex<HashMap<String, u32>>,
}

impl ScriptedEngine {
    fn new(pages: &[(&str, f64, f64, f64)]) -> Self {
        ScriptedEngine {
            pages: pages
                .iter()
                .map(|(u, p, a, lcp)| (u.to_string(), (*p, *a, *lcp)))
                .collect(),
            flaky: Mutex::new(HashMap::new()),
        }
    }

    fn flaky(self, url: &str, failures: u32) -> Self {
        self.flaky.lock().unwrap().insert(url.to_string(), failures);
        self
    }
}

fn raw_report(url: &str, performance: f64, accessibility: f64, lcp: f64) -> RawReport {
    serde_json::from_value(json!({
        "requestedUrl": url,
        "finalUrl": url,
        "lighthouseVersion": "12.0.0",
        "categories": {
            "performance": {"title": "Performance", "score": performance},
            "accessibility": {"score": accessibility},
            "best-practices": {"score": 1.0},
            "seo": {"score": 0.92}
        },
        "audits": {
            "largest-contentful-paint": {"score": 0.4, "numericValue": lcp, "numericUnit": "millisecond"},
            "cumulative-layout-shift": {"score": 1, "numericValue": 0.02},
            "total-blocking-time": {"score": 0.9, "numericValue": 150},
            "unused-javascript": {"score": 0.3, "details": {"type": "opportunity", "overallSavingsBytes": 81920}}
        }
    }))
    .unwrap()
}

impl AuditEngine for ScriptedEngine {
    async fn audit(&self, url: &str) -> Result<RawReport, AuditError> {
        {
            let mut flaky = self.flaky.lock().unwrap();
            if let Some(left) = flaky.get_mut(url) {
                if *left > 0 {
                    *left -= 1;
                    return Err(AuditError::Engine {
                        url: url.to_string(),
                        stderr: "Chrome crashed".to_string(),
                    });
                }
            }
        }
        match self.pages.get(url) {
            Some((p, a, lcp)) => Ok(raw_report(url, *p, *a, *lcp)),
            None => Err(AuditError::Engine {
                url: url.to_string(),
                stderr: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            }),
        }
    }
}

fn args(ci: bool, compare: bool) -> AuditArgs {
    AuditArgs {
        urls: None,
        urls_file: None,
        output: None,
        model: None,
        format: ReportFormat::Csv,
        ci,
        compare,
        retries: 0,
    }
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

fn report_files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("lighthouse-report-"))
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn one_bad_url_does_not_abort_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let engine = ScriptedEngine::new(&[
        ("https://a.test/", 0.95, 0.97, 1400.0),
        ("https://c.test/", 0.66, 0.91, 4200.0),
    ]);
    let mut runner = AuditRunner::new(engine, Analyzer::Table);
    let mut store = ReportStore::new(dir.path(), 10);
    let batch = urls(&["https://a.test/", "https://broken.test/", "https://c.test/"]);

    let outcomes = runner.run(&batch, &mut store).await;

    assert_eq!(outcomes.len(), 3);
    let first = outcomes[0].as_ref().unwrap();
    let failure = outcomes[1].as_ref().unwrap_err();
    let third = outcomes[2].as_ref().unwrap();

    assert_eq!(first.url, "https://a.test/");
    assert_eq!(first.analysis.priority_score, 3);
    assert!(first.analysis.critical_issues.is_empty());
    assert_eq!(first.metrics.unused_js, Some(81920.0));
    assert_eq!(failure.url, "https://broken.test/");
    assert!(failure.error.contains("ERR_NAME_NOT_RESOLVED"));
    assert_eq!(third.analysis.priority_score, 9);
    assert!(!third.analysis.critical_issues.is_empty());
    assert!(first.timestamp < failure.timestamp && failure.timestamp < third.timestamp);

    assert_eq!(report_files(dir.path()).len(), 2);
    assert_eq!(store.history(10).len(), 2);
    assert_eq!(exit_code(&outcomes, false), 1);
}

#[tokio::test]
async fn saved_reports_match_results() {
    let dir = tempfile::tempdir().unwrap();
    let engine = ScriptedEngine::new(&[("https://a.test/", 0.81, 0.9, 2600.0)]);
    let mut runner = AuditRunner::new(engine, Analyzer::Table);
    let mut store = ReportStore::new(dir.path(), 10);

    let outcomes = runner.run(&urls(&["https://a.test/"]), &mut store).await;
    let result = outcomes[0].as_ref().unwrap();

    let path = store.path_for(result.timestamp);
    let loaded = ReportStore::load(&path).await.unwrap();
    assert_eq!(&loaded, result);
    assert!(loaded.scores.performance >= 0.0 && loaded.scores.performance <= 1.0);
    assert_eq!(loaded.raw_audits.len(), 4);
}

#[tokio::test]
async fn ci_mode_fails_on_low_scores() {
    let dir = tempfile::tempdir().unwrap();
    let engine = ScriptedEngine::new(&[
        ("https://fast.test/", 0.96, 0.98, 900.0),
        ("https://inaccessible.test/", 0.97, 0.72, 900.0),
    ]);
    let mut runner = AuditRunner::new(engine, Analyzer::Table);
    let mut store = ReportStore::new(dir.path(), 10);

    let fast = urls(&["https://fast.test/"]);
    assert_eq!(audit_with(&mut runner, &mut store, &fast, &args(true, false)).await.unwrap(), 0);

    let both = urls(&["https://fast.test/", "https://inaccessible.test/"]);
    let outcomes = runner.run(&both, &mut store).await;
    let violations = ci_violations(&outcomes);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].starts_with("https://inaccessible.test/: accessibility 72"));
    assert_eq!(exit_code(&outcomes, true), 1);
    assert_eq!(exit_code(&outcomes, false), 0);

    let summaries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".csv"))
        .collect();
    assert_eq!(summaries.len(), 1);
}

#[tokio::test]
async fn second_run_compares_with_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ReportStore::new(dir.path(), 10);
    let page = urls(&["https://a.test/"]);

    let mut before = AuditRunner::new(
        ScriptedEngine::new(&[("https://a.test/", 0.70, 0.9, 3000.0)]),
        Analyzer::Table,
    );
    let first = before.run(&page, &mut store).await;
    let first_comparisons = compare_with_previous(&first, &store).await;
    assert!(first_comparisons[0].1.is_none());

    let mut after = AuditRunner::new(
        ScriptedEngine::new(&[("https://a.test/", 0.85, 0.9, 2400.0)]),
        Analyzer::Table,
    );
    let second = after.run(&page, &mut store).await;
    let comparisons = compare_with_previous(&second, &store).await;

    let cmp = comparisons[0].1.as_ref().unwrap();
    assert_eq!(cmp.performance.change, 15.0);
    assert_eq!(cmp.metrics["lcp"].change, -600.0);
    assert_eq!(cmp.metrics["lcp"].percent_change, -20.0);
    assert_eq!(cmp.metrics["tbt"].change, 0.0);
    assert!(!cmp.metrics.contains_key("fid"));
    assert_eq!(report_files(dir.path()).len(), 2);
}

#[tokio::test]
async fn unwritable_store_keeps_results() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let engine = ScriptedEngine::new(&[
        ("https://a.test/", 0.95, 0.97, 1400.0),
        ("https://b.test/", 0.91, 0.93, 1800.0),
    ]);
    let mut runner = AuditRunner::new(engine, Analyzer::Table);
    let mut store = ReportStore::new(blocker.join("reports"), 10);

    let outcomes = runner.run(&urls(&["https://a.test/", "https://b.test/"]), &mut store).await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.is_ok()));
    let remembered: Vec<&str> = store.history(10).iter().map(|r| r.url.as_str()).collect();
    assert_eq!(remembered, vec!["https://b.test/", "https://a.test/"]);
    assert_eq!(exit_code(&outcomes, false), 0);
    assert!(blocker.is_file());
}

#[tokio::test]
async fn retries_recover_flaky_pages() {
    let dir = tempfile::tempdir().unwrap();
    let engine = ScriptedEngine::new(&[("https://a.test/", 0.9, 0.9, 1000.0)]).flaky("https://a.test/", 2);
    let mut runner = AuditRunner::new(engine, Analyzer::Table).with_retries(2, Duration::ZERO);
    let mut store = ReportStore::new(dir.path(), 10);

    let outcomes = runner.run(&urls(&["https://a.test/"]), &mut store).await;

    assert!(outcomes[0].is_ok());
}

#[tokio::test]
async fn retries_are_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let engine = ScriptedEngine::new(&[("https://a.test/", 0.9, 0.9, 1000.0)]).flaky("https://a.test/", 5);
    let mut store = ReportStore::new(dir.path(), 10);
    let mut runner = AuditRunner::new(engine, Analyzer::Table).with_retries(1, Duration::ZERO);

    let outcomes = runner.run(&urls(&["https://a.test/"]), &mut store).await;

    assert!(outcomes[0].is_err());
    assert!(report_files(dir.path()).is_empty());
}
