pub mod status;

pub use status::{HostedStatus, HostedTestRequest, HostedTestResponse};
