pub mod client;

pub use client::{HostedClient, HostedError, SUBMIT_INTERVAL};
