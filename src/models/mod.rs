// src/models/mod.rs

pub mod hosted;
pub mod lighthouse;

pub use hosted::{HostedStatus, HostedTestRequest, HostedTestResponse};
pub use lighthouse::*;
