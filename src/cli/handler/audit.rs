use crate::cli::{AuditArgs, ReportFormat};
use crate::models::{AuditOutcome, ComparisonResult};
use crate::services::report_service::ReportStore;
use crate::services::site_audit_service::{
    compare, AuditEngine, AuditRunner, AuditSettings, Analyzer, LighthouseCli, ModelAdvisor,
};
use crate::utils::render::{comparison_table, score_table, summary_csv, summary_html, summary_json};
use crate::utils::{parse_url_list, process_urls_from_file, Config};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Minimum performance and accessibility score in CI mode.
pub const CI_THRESHOLD: f64 = 0.9;

pub async fn resolve_urls(
    urls: Option<&str>,
    urls_file: Option<&Path>,
    config: &Config,
) -> Result<Vec<String>> {
    let urls = match (urls, urls_file) {
        (_, Some(path)) => process_urls_from_file(path)
            .await
            .with_context(|| format!("Failed to read URLs from {}", path.display()))?,
        (Some(list), None) => parse_url_list(list),
        (None, None) => parse_url_list(&config.default_url),
    };
    if urls.is_empty() {
        bail!("no URLs to audit");
    }
    Ok(urls)
}

fn analyzer_for(model: Option<&str>, config: &Config) -> Analyzer {
    match (model, &config.ai_endpoint) {
        (Some(model), Some(endpoint)) => {
            Analyzer::Model(ModelAdvisor::new(endpoint, config.ai_key.clone(), model))
        }
        (Some(model), None) => {
            warn!(
                "--model {} ignored: LIGHTAUDIT_AI_ENDPOINT is not set, using table analysis",
                model
            );
            Analyzer::Table
        }
        (None, _) => Analyzer::Table,
    }
}

/// Scores below the CI threshold, one line per offending URL and category.
pub fn ci_violations(outcomes: &[AuditOutcome]) -> Vec<String> {
    outcomes
        .iter()
        .filter_map(|o| o.as_ref().ok())
        .flat_map(|r| {
            [
                ("performance", r.scores.performance),
                ("accessibility", r.scores.accessibility),
            ]
            .into_iter()
            .filter(|(_, score)| *score < CI_THRESHOLD)
            .map(move |(name, score)| {
                format!(
                    "{}: {} {:.0} < {:.0}",
                    r.url,
                    name,
                    score * 100.0,
                    CI_THRESHOLD * 100.0
                )
            })
        })
        .collect()
}

pub fn exit_code(outcomes: &[AuditOutcome], ci: bool) -> i32 {
    let failed = outcomes.iter().any(|o| o.is_err());
    if failed || (ci && !ci_violations(outcomes).is_empty()) {
        1
    } else {
        0
    }
}

pub fn render_summary(outcomes: &[AuditOutcome], format: ReportFormat) -> Result<String> {
    Ok(match format {
        ReportFormat::Json => summary_json(outcomes)?,
        ReportFormat::Html => summary_html(outcomes, &Utc::now().to_rfc3339()),
        ReportFormat::Csv => summary_csv(outcomes),
    })
}

async fn write_summary(dir: &Path, outcomes: &[AuditOutcome], format: ReportFormat) -> Result<PathBuf> {
    let path = dir.join(format!(
        "lighthouse-summary-{}.{}",
        Utc::now().timestamp_millis(),
        format.extension()
    ));
    let body = render_summary(outcomes, format)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, body)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Each successful result against the previous stored report for its URL.
pub async fn compare_with_previous(
    outcomes: &[AuditOutcome],
    store: &ReportStore,
) -> Vec<(String, Option<ComparisonResult>)> {
    let mut comparisons = Vec::new();
    for result in outcomes.iter().filter_map(|o| o.as_ref().ok()) {
        let previous = match store.latest_for(&result.url, result.timestamp).await {
            Ok(p) => p,
            Err(e) => {
                warn!("could not read previous reports: {}", e);
                None
            }
        };
        comparisons.push((result.url.clone(), compare(result, previous.as_ref())));
    }
    comparisons
}

/// The audit command minus engine construction.
pub async fn audit_with<E: AuditEngine>(
    runner: &mut AuditRunner<E>,
    store: &mut ReportStore,
    urls: &[String],
    args: &AuditArgs,
) -> Result<i32> {
    let outcomes = runner.run(urls, store).await;

    println!("{}", score_table(&outcomes));

    if args.compare {
        for (url, comparison) in compare_with_previous(&outcomes, store).await {
            match comparison {
                Some(cmp) => println!("Changes for {}\n{}", url, comparison_table(&cmp)),
                None => println!("No previous report for {}\n", url),
            }
        }
    }

    match write_summary(store.dir(), &outcomes, args.format).await {
        Ok(path) => info!("summary written to {}", path.display()),
        Err(e) => warn!("could not write summary: {:#}", e),
    }

    let failures = outcomes.iter().filter(|o| o.is_err()).count();
    if failures > 0 {
        println!("{} of {} URLs failed to audit", failures, outcomes.len());
    }
    if args.ci {
        let violations = ci_violations(&outcomes);
        for v in &violations {
            println!("CI threshold not met: {}", v);
        }
    }

    Ok(exit_code(&outcomes, args.ci))
}

pub async fn run_audit(args: AuditArgs, config: &Config) -> Result<i32> {
    let urls = resolve_urls(args.urls.as_deref(), args.urls_file.as_deref(), config).await?;
    let output_dir = args.output.clone().unwrap_or_else(|| config.output_dir.clone());

    let settings = AuditSettings {
        chrome_flags: config.chrome_flags.clone(),
        max_wait_for_load: config.max_wait_for_load,
        ..Default::default()
    };
    let engine = LighthouseCli::new(config.lighthouse_bin.clone(), settings);
    let analyzer = analyzer_for(args.model.as_deref(), config);
    let mut runner =
        AuditRunner::new(engine, analyzer).with_retries(args.retries, Duration::from_secs(1));
    let mut store = ReportStore::new(&output_dir, config.history_capacity);

    info!(
        "auditing {} URL(s), reports go to {}",
        urls.len(),
        output_dir.display()
    );
    audit_with(&mut runner, &mut store, &urls, &args).await
}

