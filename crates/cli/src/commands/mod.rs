pub mod build;
pub mod check;
pub mod init;
pub mod preview;
pub mod theme;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use vdb_site_core::{ThemeConfig, load_theme_or_default};

/// Config file looked up in the working directory when --config is not given
pub const DEFAULT_CONFIG: &str = "site.toml";

/// Path the config is read from
pub fn config_path(config: Option<&Path>) -> PathBuf {
    config
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
}

/// Load the theme: an explicit --config must exist, the default may not
pub fn load_config(config: Option<&Path>) -> Result<ThemeConfig> {
    let path = config_path(config);
    load_theme_or_default(&path, config.is_some())
        .with_context(|| format!("Failed to load {}", path.display()))
}
