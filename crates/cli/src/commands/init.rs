use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use vdb_site_core::ThemeConfig;

use super::DEFAULT_CONFIG;

const CONFIG_HEADER: &str = "\
# vdb-site theme configuration
#
# content: glob patterns (relative to this file) scanned for style classes.
#          A file with classes that no pattern matches gets no styles;
#          run `vdb-site check` to find such files.
# plugins: reserved for styling plugins, currently unused.
# theme.extend.colors: background, foreground and accent are all required.

";

/// Initialize a new site project directory.
///
/// Creates the directory if needed and writes a `site.toml` holding the
/// built-in theme, so it can be edited instead of written from scratch.
///
/// # Errors
///
/// Returns an error if:
/// - site.toml already exists in the directory
/// - File operations fail (permissions, disk space, etc.)
pub async fn run(path: PathBuf) -> Result<()> {
    println!("🧱 Initializing site project...");
    println!("   Path: {}", path.display());

    let config_path = write_default_config(&path)?;

    println!("   ✓ Wrote {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("   cd {}", path.display());
    println!("   vdb-site preview");

    Ok(())
}

fn write_default_config(base: &Path) -> Result<PathBuf> {
    let config_path = base.join(DEFAULT_CONFIG);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists in {}; refusing to overwrite it",
            DEFAULT_CONFIG,
            base.display()
        );
    }

    fs::create_dir_all(base)
        .with_context(|| format!("Failed to create directory {}", base.display()))?;

    let body = ThemeConfig::default()
        .to_toml()
        .context("Failed to serialize default theme")?;
    fs::write(&config_path, format!("{}{}", CONFIG_HEADER, body))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    tracing::info!(path = %config_path.display(), "wrote default config");
    Ok(config_path)
}
