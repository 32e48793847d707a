use anyhow::{Context, Result};
use std::path::PathBuf;

use super::load_config;

/// Print the theme as JSON on stdout for a Tailwind-style build tool
pub async fn run(config: Option<PathBuf>) -> Result<()> {
    let theme = load_config(config.as_deref())?;
    let json = theme.to_json().context("Failed to serialize theme")?;
    println!("{}", json);
    Ok(())
}
