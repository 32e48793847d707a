//! Content-path coverage checking.
//!
//! A styling pipeline only generates rules for classes found in files its
//! content patterns match. A file with markup that no pattern reaches is not
//! an error anywhere in that pipeline, its styles just never appear. This
//! crate finds those files ahead of time.

use globset::{Glob, GlobBuilder, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};
use vdb_site_core::{Error, Result, ThemeConfig};
use walkdir::{DirEntry, WalkDir};

/// Extensions of files that can carry markup with class references
const MARKUP_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx", "mdx", "html", "rs"];

/// Substrings that indicate a file references style classes
/// (quoted literals, JSX props, maud `class=(expr)` splices and builder calls)
const CLASS_MARKERS: &[&str] = &["class=\"", "class=(", "className=", ".class("];

/// Directories never scanned
const SKIP_DIRS: &[&str] = &["target", "node_modules", "dist"];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Result of scanning a project tree
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Coverage {
    /// Files with class references, relative to the root
    pub styled_files: Vec<PathBuf>,
    /// Subset of `styled_files` that no content pattern matches
    pub uncovered: Vec<PathBuf>,
    /// Patterns that matched no file at all
    pub unused_patterns: Vec<String>,
}

/// Compile a content pattern, relative to the project root
pub fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    let trimmed = pattern.trim_start_matches("./");
    let glob: Glob = GlobBuilder::new(trimmed)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::ConfigParse(format!("Invalid content pattern '{}': {}", pattern, e)))?;
    Ok(glob.compile_matcher())
}

/// Does the file contain anything that looks like a class reference?
pub fn has_class_references(contents: &str) -> bool {
    CLASS_MARKERS.iter().any(|m| contents.contains(m))
}

fn is_skipped(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIP_DIRS.contains(&&*name)
}

fn is_markup_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MARKUP_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Find every styled file under `root` and match it against the patterns
pub fn scan_coverage(root: &Path, matchers: &[(String, GlobMatcher)]) -> Result<Coverage> {
    let mut coverage = Coverage::default();
    let mut used = vec![false; matchers.len()];

    for entry in WalkDir::new(root).into_iter().filter_entry(|e| !is_skipped(e)) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Error::InvalidData(format!(
                    "Failed to scan {}: {}",
                    root.display(),
                    e
                )));
            }
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_markup_file(entry.path()) {
            continue;
        }

        let contents = match fs::read_to_string(entry.path()) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(path = %entry.path().display(), error = %e, "skipping unreadable file");
                continue;
            }
        };

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();

        // Patterns may legitimately match files without classes
        for (i, (_, matcher)) in matchers.iter().enumerate() {
            if matcher.is_match(&relative) {
                used[i] = true;
            }
        }

        if !has_class_references(&contents) {
            continue;
        }

        if !matchers.iter().any(|(_, m)| m.is_match(&relative)) {
            coverage.uncovered.push(relative.clone());
        }
        coverage.styled_files.push(relative);
    }

    coverage.unused_patterns = matchers
        .iter()
        .zip(used)
        .filter(|(_, used)| !used)
        .map(|((pattern, _), _)| pattern.clone())
        .collect();

    Ok(coverage)
}

/// Check that the theme's content paths cover every styled file under `root`
pub fn check_content_coverage(root: &Path, config: &ThemeConfig) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();

    if !root.is_dir() {
        return Err(Error::InvalidData(format!(
            "Project root is not a directory: {}",
            root.display()
        )));
    }

    let mut matchers = Vec::with_capacity(config.content.len());
    for pattern in config.content.iter() {
        match compile_pattern(pattern) {
            Ok(m) => matchers.push((pattern.to_string(), m)),
            Err(e) => report.errors.push(e.to_string()),
        }
    }

    let coverage = scan_coverage(root, &matchers)?;
    tracing::debug!(
        styled = coverage.styled_files.len(),
        uncovered = coverage.uncovered.len(),
        "content coverage scanned"
    );

    for path in &coverage.uncovered {
        report.warnings.push(format!(
            "{} references style classes but no content path matches it; its styles will not be generated",
            path.display()
        ));
    }

    for pattern in &coverage.unused_patterns {
        report
            .warnings
            .push(format!("Content path '{}' matches no files", pattern));
    }

    report.info.push(format!(
        "{} styled file(s) found, {} covered by {} content path(s)",
        coverage.styled_files.len(),
        coverage.styled_files.len() - coverage.uncovered.len(),
        config.content.len()
    ));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use vdb_site_core::parse_theme_toml_str;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn config(patterns: &[&str]) -> ThemeConfig {
        let list: Vec<String> = patterns.iter().map(|p| format!("\"{}\"", p)).collect();
        parse_theme_toml_str(&format!("content = [{}]", list.join(", "))).unwrap()
    }

    #[test]
    fn test_compile_pattern_brace_and_globstar() {
        let m = compile_pattern("./app/**/*.{js,ts,jsx,tsx,mdx}").unwrap();
        assert!(m.is_match("app/page.tsx"));
        assert!(m.is_match("app/blog/post/page.mdx"));
        assert!(!m.is_match("app/page.css"));
        assert!(!m.is_match("components/button.tsx"));
    }

    #[test]
    fn test_compile_pattern_star_does_not_cross_directories() {
        let m = compile_pattern("./crates/*/src/**/*.rs").unwrap();
        assert!(m.is_match("crates/generator/src/home.rs"));
        assert!(!m.is_match("crates/a/b/src/home.rs"));
    }

    #[test]
    fn test_compile_pattern_invalid() {
        let result = compile_pattern("./app/**/*.{js,ts");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid content pattern"));
    }

    #[test]
    fn test_has_class_references() {
        assert!(has_class_references(r#"<div className="flex">"#));
        assert!(has_class_references(r#"<p class="text-sm">"#));
        assert!(has_class_references(r#"Element::new("p").class("mt-3")"#));
        assert!(!has_class_references("fn main() {}"));
    }

    #[test]
    fn test_has_class_references_through_constants() {
        assert!(has_class_references("body class=(BODY_CLASSES) { (children) }"));
        assert!(has_class_references(
            r#"Element::new("body").class(BODY_CLASSES)"#
        ));
        assert!(!has_class_references("let classes = BODY_CLASSES;"));
    }

    #[test]
    fn test_check_flags_uncovered_class_constant() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "widgets/src/shell.rs",
            "html! { body class=(SHELL_CLASSES) { (children) } }",
        );

        let coverage = scan_coverage(
            dir.path(),
            &[(
                "./app/**/*.tsx".to_string(),
                compile_pattern("./app/**/*.tsx").unwrap(),
            )],
        )
        .unwrap();

        assert_eq!(coverage.styled_files, [PathBuf::from("widgets/src/shell.rs")]);
        assert_eq!(coverage.uncovered, [PathBuf::from("widgets/src/shell.rs")]);
    }

    #[test]
    fn test_check_all_covered() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/page.tsx", r#"<main className="flex">"#);
        write(dir.path(), "app/layout.tsx", r#"<body className="min-h-screen">"#);
        write(dir.path(), "components/card.jsx", r#"<div className="p-4" />"#);

        let report = check_content_coverage(
            dir.path(),
            &config(&[
                "./app/**/*.{js,ts,jsx,tsx,mdx}",
                "./components/**/*.{js,ts,jsx,tsx,mdx}",
            ]),
        )
        .unwrap();

        assert!(report.is_ok());
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.info[0].starts_with("3 styled file(s) found, 3 covered"));
    }

    #[test]
    fn test_check_reports_uncovered_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/page.tsx", r#"<main className="flex">"#);
        write(dir.path(), "widgets/chart.tsx", r#"<svg className="h-4">"#);

        let report =
            check_content_coverage(dir.path(), &config(&["./app/**/*.{js,ts,jsx,tsx,mdx}"]))
                .unwrap();

        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("chart.tsx"));
        assert!(report.warnings[0].contains("will not be generated"));
    }

    #[test]
    fn test_check_ignores_unstyled_and_non_markup_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/page.tsx", r#"<main className="flex">"#);
        write(dir.path(), "lib/math.ts", "export const add = (a, b) => a + b;");
        write(dir.path(), "notes/readme.txt", r#"class="not-markup""#);

        let coverage = scan_coverage(
            dir.path(),
            &[(
                "./app/**/*.tsx".to_string(),
                compile_pattern("./app/**/*.tsx").unwrap(),
            )],
        )
        .unwrap();

        assert_eq!(coverage.styled_files, [PathBuf::from("app/page.tsx")]);
        assert!(coverage.uncovered.is_empty());
    }

    #[test]
    fn test_check_skips_build_and_hidden_dirs() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/page.tsx", r#"<main className="flex">"#);
        write(dir.path(), "node_modules/pkg/index.js", r#"<div className="x">"#);
        write(dir.path(), "target/debug/out.html", r#"<div class="x">"#);
        write(dir.path(), ".next/server/page.js", r#"<div className="x">"#);

        let report =
            check_content_coverage(dir.path(), &config(&["./app/**/*.tsx"])).unwrap();
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn test_check_reports_unused_pattern() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/page.tsx", r#"<main className="flex">"#);

        let report = check_content_coverage(
            dir.path(),
            &config(&["./app/**/*.tsx", "./components/**/*.tsx"]),
        )
        .unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("./components/**/*.tsx"));
        assert!(report.warnings[0].contains("matches no files"));
    }

    #[test]
    fn test_check_invalid_pattern_is_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app/page.tsx", r#"<main className="flex">"#);

        let report = check_content_coverage(
            dir.path(),
            &config(&["./app/**/*.tsx", "./components/**/*.{tsx"]),
        )
        .unwrap();

        assert!(!report.is_ok());
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_check_missing_root() {
        let result = check_content_coverage(
            Path::new("definitely/not/a/dir"),
            &ThemeConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_default_paths_cover_workspace_markup() {
        // Every workspace source that builds markup with classes must be scanned
        let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let config = ThemeConfig::default();
        let matchers: Vec<_> = config
            .content
            .iter()
            .map(|p| (p.to_string(), compile_pattern(p).unwrap()))
            .collect();

        let coverage = scan_coverage(&workspace, &matchers).unwrap();
        assert!(
            coverage
                .styled_files
                .iter()
                .any(|p| p.ends_with("generator/src/home.rs"))
        );
        assert!(
            coverage
                .styled_files
                .iter()
                .any(|p| p.ends_with("generator/src/layout.rs"))
        );
        let uncovered: Vec<_> = coverage
            .uncovered
            .iter()
            .filter(|p| p.starts_with("crates"))
            .collect();
        assert!(uncovered.is_empty(), "{:?}", uncovered);
    }
}
