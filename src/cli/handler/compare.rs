use crate::cli::CompareArgs;
use crate::services::report_service::ReportStore;
use crate::services::site_audit_service::compare_checked;
use crate::utils::render::comparison_table;
use anyhow::{Context, Result};

pub async fn run_compare(args: CompareArgs) -> Result<i32> {
    let current = ReportStore::load(&args.current)
        .await
        .context("Failed to read current report")?;
    let previous = ReportStore::load(&args.previous)
        .await
        .context("Failed to read previous report")?;

    let comparison = compare_checked(&current, &previous)?;

    println!("Comparison for {}", current.url);
    println!("{}", comparison_table(&comparison));
    Ok(0)
}
