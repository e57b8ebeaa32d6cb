pub mod engine;
pub mod runner;

pub use engine::{AuditEngine, AuditSettings, LighthouseCli};
pub use runner::{AuditRunner, SessionClock};
