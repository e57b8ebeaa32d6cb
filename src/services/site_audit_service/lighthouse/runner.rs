use crate::models::{AuditFailure, AuditOutcome, AuditResult, RawReport, Scores};
use crate::services::report_service::ReportStore;
use crate::services::site_audit_service::compute::{extract_metrics, recommend, Analyzer};
use crate::services::site_audit_service::error::AuditError;
use crate::services::site_audit_service::lighthouse::engine::AuditEngine;
use chrono::Utc;
use log::{error, info, warn};
use std::time::Duration;

/// Hands out epoch-ms timestamps that strictly increase within a session.
#[derive(Debug, Default)]
pub struct SessionClock {
    last: i64,
}

impl SessionClock {
    pub fn next(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last
    }
}

/// Audits URLs one at a time. A failing URL is recorded and the batch
/// moves on.
pub struct AuditRunner<E> {
    engine: E,
    analyzer: Analyzer,
    retries: u32,
    backoff: Duration,
    clock: SessionClock,
}

impl<E: AuditEngine> AuditRunner<E> {
    pub fn new(engine: E, analyzer: Analyzer) -> Self {
        AuditRunner {
            engine,
            analyzer,
            retries: 0,
            backoff: Duration::from_secs(1),
            clock: SessionClock::default(),
        }
    }

    /// Extra attempts per URL, with exponential backoff starting at `backoff`.
    pub fn with_retries(mut self, retries: u32, backoff: Duration) -> Self {
        self.retries = retries;
        self.backoff = backoff;
        self
    }

    async fn fetch(&self, url: &str) -> Result<RawReport, AuditError> {
        let mut attempt = 0;
        loop {
            match self.engine.audit(url).await {
                Ok(report) => return Ok(report),
                Err(e) if attempt < self.retries => {
                    let wait = self.backoff.saturating_mul(2u32.saturating_pow(attempt));
                    attempt += 1;
                    warn!(
                        "audit of {} failed ({}), retry {}/{} in {:?}",
                        url, e, attempt, self.retries, wait
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn audit_url(&mut self, url: &str) -> Result<AuditResult, AuditError> {
        let raw = self.fetch(url).await?;

        let scores = Scores::from_categories(&raw.categories);
        let metrics = extract_metrics(&raw.audits);
        let analysis = self.analyzer.analyze(&scores, &metrics).await;
        let recommendations = recommend(&scores, &metrics);

        Ok(AuditResult {
            url: url.to_string(),
            timestamp: self.clock.next(),
            scores,
            metrics,
            raw_audits: raw.audits,
            analysis,
            recommendations,
        })
    }

    /// One outcome per input URL, in input order. Successful results are
    /// saved to `store`; a failed write is logged and the result kept.
    pub async fn run(&mut self, urls: &[String], store: &mut ReportStore) -> Vec<AuditOutcome> {
        let mut outcomes = Vec::with_capacity(urls.len());

        for url in urls {
            info!("auditing {}", url);
            match self.audit_url(url).await {
                Ok(mut result) => {
                    info!(
                        "{}: performance {}/100",
                        url,
                        result.scores.performance_percent()
                    );
                    match store.save(&mut result).await {
                        Ok(path) => info!("report saved to {}", path.display()),
                        Err(e) => warn!("could not save report for {}: {}", url, e),
                    }
                    outcomes.push(Ok(result));
                }
                Err(e) => {
                    error!("audit of {} failed: {}", url, e);
                    outcomes.push(Err(AuditFailure {
                        url: url.clone(),
                        error: e.to_string(),
                        timestamp: self.clock.next(),
                    }));
                }
            }
        }

        outcomes
    }
}
