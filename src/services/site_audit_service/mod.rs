// src/services/site_audit_service/mod.rs

pub mod compute;
pub mod error;
pub mod lighthouse;

pub use compute::{
    analyze, compare, compare_checked, compute_averages, compute_score_stats, extract_metrics,
    recommend, Analyzer, ModelAdvisor,
};
pub use error::AuditError;
pub use lighthouse::{AuditEngine, AuditRunner, AuditSettings, LighthouseCli};
