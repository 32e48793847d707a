use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    content: Option<Vec<String>>,
    plugins: Option<Vec<String>>,
    #[serde(default)]
    theme: RawTheme,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTheme {
    #[serde(default)]
    extend: RawThemeExtend,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawThemeExtend {
    // A present table must name every color; ThemePalette enforces that
    colors: Option<ThemePalette>,
}

/// Parse site.toml from a file path
pub fn parse_theme_toml<P: AsRef<Path>>(path: P) -> Result<ThemeConfig> {
    let content = fs::read_to_string(path)?;
    parse_theme_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_theme_toml_str(content: &str) -> Result<ThemeConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let content = match raw.content {
        Some(patterns) => ContentPaths::new(patterns)?,
        None => ContentPaths::default(),
    };

    let plugins = raw.plugins.unwrap_or_default();
    if let Some(blank) = plugins.iter().find(|p| p.trim().is_empty()) {
        return Err(Error::ConfigParse(format!(
            "Empty plugin name in 'plugins': '{}'",
            blank
        )));
    }

    let colors = raw.theme.extend.colors.unwrap_or_default();

    Ok(ThemeConfig {
        content,
        plugins,
        theme: Theme {
            extend: ThemeExtend { colors },
        },
    })
}

/// Load the theme configuration, falling back to built-in defaults.
///
/// A missing file is only tolerated when `required` is false; any file that
/// exists must parse.
pub fn load_theme_or_default<P: AsRef<Path>>(path: P, required: bool) -> Result<ThemeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        if required {
            return Err(Error::ConfigParse(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), "no site config, using defaults");
        return Ok(ThemeConfig::default());
    }

    tracing::debug!(path = %path.display(), "loading site config");
    parse_theme_toml(path)
}
