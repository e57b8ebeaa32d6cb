use crate::services::report_service::DEFAULT_HISTORY_CAPACITY;
use log::warn;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_URL: &str = "http://localhost:3000";
pub const DEFAULT_OUTPUT_DIR: &str = "./lighthouse-reports";

/// Settings read from the environment (and `.env`), overridable by flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub default_url: String,
    pub output_dir: PathBuf,
    pub lighthouse_bin: String,
    pub chrome_flags: String,
    pub max_wait_for_load: Duration,
    pub history_capacity: usize,
    pub ai_endpoint: Option<String>,
    pub ai_key: Option<String>,
    pub hosted_endpoint: Option<String>,
    pub hosted_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_url: DEFAULT_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            lighthouse_bin: "lighthouse".to_string(),
            chrome_flags: "--headless --no-sandbox".to_string(),
            max_wait_for_load: Duration::from_millis(120_000),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            ai_endpoint: None,
            ai_key: None,
            hosted_endpoint: None,
            hosted_key: None,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parsed = |key: &str| -> Option<u64> {
            let raw = get(key)?;
            match u64::from_str(raw.trim()) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("ignoring {}={:?}: not a number", key, raw);
                    None
                }
            }
        };

        Config {
            default_url: get("LIGHTAUDIT_URL").unwrap_or(defaults.default_url),
            output_dir: get("LIGHTAUDIT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            lighthouse_bin: get("LIGHTHOUSE_BIN").unwrap_or(defaults.lighthouse_bin),
            chrome_flags: get("LIGHTAUDIT_CHROME_FLAGS").unwrap_or(defaults.chrome_flags),
            max_wait_for_load: parsed("LIGHTAUDIT_MAX_WAIT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.max_wait_for_load),
            history_capacity: parsed("LIGHTAUDIT_HISTORY_CAPACITY")
                .map(|v| v as usize)
                .unwrap_or(defaults.history_capacity),
            ai_endpoint: get("LIGHTAUDIT_AI_ENDPOINT"),
            ai_key: get("LIGHTAUDIT_AI_KEY"),
            hosted_endpoint: get("LIGHTAUDIT_HOSTED_ENDPOINT"),
            hosted_key: get("LIGHTAUDIT_HOSTED_KEY"),
        }
    }
}
