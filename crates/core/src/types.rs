use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Static text of a single page
///
/// Fixed at compile time: the paragraph count is part of the type so a page
/// can never render with more or fewer than four body paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContent {
    pub title: &'static str,
    pub tagline: &'static str,
    pub paragraphs: [&'static str; 4],
}

/// A CSS color value accepted by the stylesheet compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse a hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`) or functional
    /// (`rgb()`, `rgba()`, `hsl()`, `hsla()`) color.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();

        if let Some(hex) = value.strip_prefix('#') {
            let valid_len = matches!(hex.len(), 3 | 4 | 6 | 8);
            if valid_len && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Ok(Color(value.to_ascii_lowercase()));
            }
            return Err(Error::InvalidData(format!(
                "Invalid hex color '{}', expected #rgb, #rgba, #rrggbb or #rrggbbaa",
                value
            )));
        }

        let lower = value.to_ascii_lowercase();
        if is_color_function(&lower) {
            return Ok(Color(lower));
        }

        Err(Error::InvalidData(format!(
            "Invalid color '{}', expected a hex code or rgb()/hsl() value",
            value
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `rgb()`, `rgba()`, `hsl()` or `hsla()` holding three or four numeric
/// channels, separated by commas, spaces or `/`. Anything else could close
/// the declaration it is written into.
fn is_color_function(value: &str) -> bool {
    const FUNCTIONS: &[&str] = &["rgb", "rgba", "hsl", "hsla"];

    let Some((name, rest)) = value.split_once('(') else {
        return false;
    };
    let Some(args) = rest.strip_suffix(')') else {
        return false;
    };
    if !FUNCTIONS.contains(&name) {
        return false;
    }

    let channels: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    matches!(channels.len(), 3 | 4) && channels.iter().all(|t| is_channel(t))
}

fn is_channel(token: &str) -> bool {
    let number = token
        .strip_suffix('%')
        .or_else(|| token.strip_suffix("deg"))
        .unwrap_or(token);
    !number.is_empty()
        && number
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        && number.parse::<f64>().is_ok()
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named colors exposed to the styling pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemePalette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
}

impl ThemePalette {
    /// Semantic names in declaration order
    pub const NAMES: [&'static str; 3] = ["background", "foreground", "accent"];

    /// (name, color) pairs in declaration order
    pub fn entries(&self) -> [(&'static str, &Color); 3] {
        [
            ("background", &self.background),
            ("foreground", &self.foreground),
            ("accent", &self.accent),
        ]
    }

    pub fn get(&self, name: &str) -> Option<&Color> {
        self.entries()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| c)
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            background: Color("#ffffff".to_string()),
            foreground: Color("#0f172a".to_string()),
            accent: Color("#ef4444".to_string()),
        }
    }
}

/// Glob patterns naming the files scanned for utility class usage
///
/// Never empty. Order is preserved and duplicates are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ContentPaths(Vec<String>);

impl ContentPaths {
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.is_empty() {
            return Err(Error::ConfigParse(
                "content must list at least one path pattern".to_string(),
            ));
        }

        let mut seen: Vec<&str> = Vec::with_capacity(patterns.len());
        for pattern in &patterns {
            validate_content_pattern(pattern)?;
            if seen.contains(&pattern.as_str()) {
                return Err(Error::ConfigParse(format!(
                    "Duplicate content pattern '{}'",
                    pattern
                )));
            }
            seen.push(pattern);
        }

        Ok(ContentPaths(patterns))
    }

    pub fn patterns(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for ContentPaths {
    type Error = Error;

    fn try_from(patterns: Vec<String>) -> Result<Self> {
        ContentPaths::new(patterns)
    }
}

impl From<ContentPaths> for Vec<String> {
    fn from(paths: ContentPaths) -> Self {
        paths.0
    }
}

impl Default for ContentPaths {
    fn default() -> Self {
        ContentPaths(
            [
                "./app/**/*.{js,ts,jsx,tsx,mdx}",
                "./components/**/*.{js,ts,jsx,tsx,mdx}",
                "./crates/*/src/**/*.rs",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
        )
    }
}

/// Validate a content glob pattern.
///
/// Patterns are resolved against the project root, so they must stay inside
/// it: absolute patterns and `..` segments are rejected, as are blank ones.
fn validate_content_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(Error::ConfigParse("Empty pattern in 'content'".to_string()));
    }

    if pattern.starts_with('/') || pattern.starts_with('\\') || pattern.get(1..2) == Some(":") {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in 'content': '{}'. Use relative patterns only.",
            pattern
        )));
    }

    if pattern.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(Error::ConfigParse(format!(
            "Parent directory references (..) not allowed in 'content': '{}'",
            pattern
        )));
    }

    Ok(())
}

/// `theme` section of the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub extend: ThemeExtend,
}

/// `theme.extend` section: additions on top of the pipeline's defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeExtend {
    pub colors: ThemePalette,
}

/// Complete styling configuration
///
/// Serializes to the `content` / `plugins` / `theme.extend.colors` shape a
/// Tailwind-style build tool reads. Built once and shared by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub content: ContentPaths,
    pub plugins: Vec<String>,
    pub theme: Theme,
}

impl ThemeConfig {
    pub fn palette(&self) -> &ThemePalette {
        &self.theme.extend.colors
    }

    /// Pretty JSON for external styling tools
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// TOML in the `site.toml` layout
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
