use crate::models::RawReport;
use crate::services::site_audit_service::error::AuditError;
use log::debug;
use std::future::Future;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub const CATEGORIES: [&str; 4] = ["performance", "accessibility", "best-practices", "seo"];

// Desktop emulation
pub const SCREEN_WIDTH: u32 = 1350;
pub const SCREEN_HEIGHT: u32 = 940;
pub const DEVICE_SCALE_FACTOR: u32 = 1;

// Simulated network/CPU throttling
pub const RTT_MS: u32 = 40;
pub const THROUGHPUT_KBPS: u32 = 10240;
pub const CPU_SLOWDOWN: u32 = 1;

/// Runs one audit of one URL.
pub trait AuditEngine {
    fn audit(&self, url: &str) -> impl Future<Output = Result<RawReport, AuditError>> + Send;
}

#[derive(Debug, Clone)]
pub struct AuditSettings {
    pub chrome_flags: String,
    pub max_wait_for_load: Duration,
    /// Hard limit on one engine run, browser startup included.
    pub timeout: Duration,
}

impl Default for AuditSettings {
    fn default() -> Self {
        AuditSettings {
            chrome_flags: "--headless --no-sandbox".to_string(),
            max_wait_for_load: Duration::from_millis(120_000),
            timeout: Duration::from_secs(300),
        }
    }
}

/// Drives the `lighthouse` command line tool. Every call launches and tears
/// down its own headless Chrome.
#[derive(Debug, Clone)]
pub struct LighthouseCli {
    bin: String,
    settings: AuditSettings,
}

impl LighthouseCli {
    pub fn new(bin: impl Into<String>, settings: AuditSettings) -> Self {
        LighthouseCli {
            bin: bin.into(),
            settings,
        }
    }

    pub fn args(&self, url: &str) -> Vec<String> {
        vec![
            url.to_string(),
            "--output=json".to_string(),
            "--output-path=stdout".to_string(),
            "--quiet".to_string(),
            "--no-enable-error-reporting".to_string(),
            format!("--only-categories={}", CATEGORIES.join(",")),
            "--preset=desktop".to_string(),
            "--form-factor=desktop".to_string(),
            "--screenEmulation.mobile=false".to_string(),
            format!("--screenEmulation.width={}", SCREEN_WIDTH),
            format!("--screenEmulation.height={}", SCREEN_HEIGHT),
            format!("--screenEmulation.deviceScaleFactor={}", DEVICE_SCALE_FACTOR),
            "--throttling-method=simulate".to_string(),
            format!("--throttling.rttMs={}", RTT_MS),
            format!("--throttling.throughputKbps={}", THROUGHPUT_KBPS),
            format!("--throttling.cpuSlowdownMultiplier={}", CPU_SLOWDOWN),
            format!(
                "--max-wait-for-load={}",
                self.settings.max_wait_for_load.as_millis()
            ),
            format!("--chrome-flags={}", self.settings.chrome_flags),
        ]
    }
}

impl AuditEngine for LighthouseCli {
    async fn audit(&self, url: &str) -> Result<RawReport, AuditError> {
        debug!("running {} {}", self.bin, url);
        let child = Command::new(&self.bin)
            .args(self.args(url))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AuditError::Launch {
                bin: self.bin.clone(),
                source,
            })?;

        let output = tokio::time::timeout(self.settings.timeout, child.wait_with_output())
            .await
            .map_err(|_| AuditError::Timeout {
                url: url.to_string(),
                secs: self.settings.timeout.as_secs(),
            })?
            .map_err(|source| AuditError::Launch {
                bin: self.bin.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(AuditError::Engine {
                url: url.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        serde_json::from_slice::<RawReport>(&output.stdout).map_err(|source| AuditError::Parse {
            url: url.to_string(),
            source,
        })
    }
}
