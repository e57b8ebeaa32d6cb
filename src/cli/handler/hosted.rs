use crate::cli::HostedArgs;
use crate::services::hosted_service::HostedClient;
use crate::utils::render::table::Table;
use crate::utils::{parse_url_list, Config};
use anyhow::{bail, Result};

pub async fn run_hosted(args: HostedArgs, config: &Config) -> Result<i32> {
    let Some(endpoint) = config.hosted_endpoint.as_deref() else {
        bail!("LIGHTAUDIT_HOSTED_ENDPOINT is not set");
    };
    let urls = parse_url_list(args.urls.as_deref().unwrap_or(&config.default_url));
    let regions: Vec<String> = args
        .regions
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();
    if urls.is_empty() || regions.is_empty() {
        bail!("need at least one URL and one region");
    }

    let client = HostedClient::new(endpoint, config.hosted_key.clone());
    let results = client.submit_all(&urls, &regions).await;

    let mut table = Table::new(["URL", "Test id", "Status"]);
    let mut failed = 0;
    for (url, outcome) in &results {
        match outcome {
            Ok(r) => table.row([url.clone(), r.test_id.clone(), r.status.to_string()]),
            Err(e) => {
                failed += 1;
                table.row([url.clone(), "-".to_string(), format!("FAILED: {}", e)]);
            }
        }
    }
    println!("{}", table.render());

    Ok(if failed > 0 { 1 } else { 0 })
}
