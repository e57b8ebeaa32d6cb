pub mod hosted_service;
pub mod report_service;
pub mod site_audit_service;

pub use hosted_service::{HostedClient, HostedError};
pub use report_service::{ReportStore, StoreError};
pub use site_audit_service::{
    compare, compute_averages, AuditEngine, AuditError, AuditRunner, AuditSettings, Analyzer,
    LighthouseCli,
};
