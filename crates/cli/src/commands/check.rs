use anyhow::{Context, Result};
use std::path::PathBuf;
use vdb_site_validator::check_content_coverage;

use super::load_config;

pub async fn run(config: Option<PathBuf>, root: PathBuf) -> Result<()> {
    println!("🔍 Checking content paths under: {}", root.display());

    let theme = load_config(config.as_deref())?;
    let report = check_content_coverage(&root, &theme).context("Failed to scan project")?;

    for line in &report.info {
        println!("   {}", line);
    }
    for warning in &report.warnings {
        println!("   ⚠ {}", warning);
    }
    for error in &report.errors {
        println!("   ✗ {}", error);
    }

    if !report.is_ok() {
        anyhow::bail!("{} content path error(s)", report.errors.len());
    }

    println!("✓ Content paths valid");
    Ok(())
}
