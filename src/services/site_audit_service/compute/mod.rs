pub mod analysis;
pub mod compare;
pub mod metrics;
pub mod recommendations;
pub mod stats;

pub use analysis::{analyze, priority_for, AdvisorError, Analyzer, ModelAdvisor};
pub use compare::{compare, compare_checked, CompareError};
pub use metrics::extract_metrics;
pub use recommendations::recommend;
pub use stats::{compute_averages, compute_score_stats};
