use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("failed to launch {bin}: {source}")]
    Launch {
        bin: String,
        #[source]
        source: io::Error,
    },

    #[error("lighthouse failed for {url}: {stderr}")]
    Engine { url: String, stderr: String },

    #[error("could not parse lighthouse output for {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("lighthouse timed out for {url} after {secs}s")]
    Timeout { url: String, secs: u64 },
}
