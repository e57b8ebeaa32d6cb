use crate::cli::InitArgs;
use crate::cli::handler::audit::CI_THRESHOLD;
use crate::utils::{parse_url_list, Config};
use anyhow::{Context, Result};
use log::info;
use serde_json::{json, Value};
use tokio::fs;

/// Lighthouse CI configuration for the given URLs.
pub fn default_ci_config(urls: &[String]) -> Value {
    json!({
        "ci": {
            "collect": {
                "url": urls,
                "numberOfRuns": 3,
                "settings": {
                    "preset": "desktop",
                    "onlyCategories": ["performance", "accessibility", "best-practices", "seo"],
                    "chromeFlags": "--headless --no-sandbox"
                }
            },
            "assert": {
                "assertions": {
                    "categories:performance": ["error", {"minScore": CI_THRESHOLD}],
                    "categories:accessibility": ["error", {"minScore": CI_THRESHOLD}],
                    "categories:best-practices": ["warn", {"minScore": CI_THRESHOLD}],
                    "categories:seo": ["warn", {"minScore": CI_THRESHOLD}]
                }
            },
            "upload": {
                "target": "temporary-public-storage"
            }
        }
    })
}

pub async fn run_init(args: InitArgs, config: &Config) -> Result<i32> {
    let output_dir = args.output.unwrap_or_else(|| config.output_dir.clone());
    let urls = parse_url_list(args.urls.as_deref().unwrap_or(&config.default_url));

    if fs::try_exists(&args.config).await.unwrap_or(false) {
        println!("{} already exists, leaving it untouched", args.config.display());
    } else {
        let body = serde_json::to_string_pretty(&default_ci_config(&urls))?;
        fs::write(&args.config, body)
            .await
            .with_context(|| format!("Failed to write {}", args.config.display()))?;
        println!("Wrote {}", args.config.display());
    }

    fs::create_dir_all(&output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    info!("report directory ready at {}", output_dir.display());
    println!("Reports will be saved to {}", output_dir.display());
    Ok(0)
}
