pub mod analysis;
pub mod audit;
pub mod category;
pub mod comparison;
pub mod metrics;
pub mod report;
pub mod stats;

pub use analysis::{Analysis, Priority, Recommendation};
pub use audit::Audit;
pub use category::{Categories, Category, Scores};
pub use comparison::{ComparisonResult, MetricDelta, ScoreDelta};
pub use metrics::{Metric, Metrics};
pub use report::{AuditFailure, AuditOutcome, AuditResult, RawReport};
pub use stats::{AverageReport, CategoriesStats, ScoreStats};
