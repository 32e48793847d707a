//! Just-in-time utility stylesheet.
//!
//! Only classes that a rendered document actually uses get a rule. Classes
//! that are neither in the utility table nor derived from the theme palette
//! produce nothing, which is the same silent failure mode a content path that
//! misses a file has in a scanning pipeline.

use scraper::{ElementRef, Html};
use std::collections::BTreeSet;
use std::fmt::Write;
use vdb_site_core::ThemeConfig;

struct Utility {
    class: &'static str,
    /// Appended to `.class` to form the selector
    selector_suffix: &'static str,
    declarations: &'static str,
}

const fn utility(class: &'static str, declarations: &'static str) -> Utility {
    Utility {
        class,
        selector_suffix: "",
        declarations,
    }
}

// Order matters: later rules win, so line-height utilities follow font sizes.
const UTILITIES: &[Utility] = &[
    utility("flex", "display: flex;"),
    utility("flex-col", "flex-direction: column;"),
    utility("items-center", "align-items: center;"),
    utility("min-h-screen", "min-height: 100vh;"),
    utility("w-full", "width: 100%;"),
    utility("max-w-3xl", "max-width: 48rem;"),
    utility("px-6", "padding-left: 1.5rem; padding-right: 1.5rem;"),
    utility("py-12", "padding-top: 3rem; padding-bottom: 3rem;"),
    utility("pb-6", "padding-bottom: 1.5rem;"),
    utility("mb-10", "margin-bottom: 2.5rem;"),
    utility("mt-3", "margin-top: 0.75rem;"),
    Utility {
        class: "space-y-6",
        selector_suffix: " > :not([hidden]) ~ :not([hidden])",
        declarations: "margin-top: 1.5rem;",
    },
    utility("border-b", "border-bottom-width: 1px;"),
    utility("border-slate-200", "border-color: #e2e8f0;"),
    utility("bg-white", "background-color: #ffffff;"),
    utility("text-3xl", "font-size: 1.875rem; line-height: 2.25rem;"),
    utility("text-sm", "font-size: 0.875rem; line-height: 1.25rem;"),
    utility("font-semibold", "font-weight: 600;"),
    utility("tracking-tight", "letter-spacing: -0.025em;"),
    utility("leading-relaxed", "line-height: 1.625;"),
    utility("text-black", "color: #000000;"),
    utility("text-red-500", "color: #ef4444;"),
    utility("text-red-600", "color: #dc2626;"),
    utility(
        "antialiased",
        "-webkit-font-smoothing: antialiased; -moz-osx-font-smoothing: grayscale;",
    ),
];

/// Palette-derived utility prefixes and the property each one sets
const THEME_PREFIXES: &[(&str, &str)] = &[
    ("bg-", "background-color"),
    ("text-", "color"),
    ("border-", "border-color"),
];

const BASE: &str = "\
*, ::before, ::after { box-sizing: border-box; border-width: 0; border-style: solid; border-color: #e5e7eb; }
body { margin: 0; font-family: ui-sans-serif, system-ui, -apple-system, \"Segoe UI\", Roboto, sans-serif; }
h1, p { margin: 0; font-size: inherit; font-weight: inherit; }
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub css: String,
    /// Classes used by the document that no rule could be generated for
    pub unknown: Vec<String>,
}

/// Compile a stylesheet covering `classes` with the given theme
pub fn compile(config: &ThemeConfig, classes: &BTreeSet<String>) -> Stylesheet {
    let palette = config.palette();
    let mut css = String::from(BASE);

    css.push_str(":root {");
    for (name, color) in palette.entries() {
        let _ = write!(css, " --color-{}: {};", name, color);
    }
    css.push_str(" }\n");

    for u in UTILITIES.iter().filter(|u| classes.contains(u.class)) {
        let _ = writeln!(
            css,
            ".{}{} {{ {} }}",
            u.class, u.selector_suffix, u.declarations
        );
    }

    for (name, _) in palette.entries() {
        for (prefix, property) in THEME_PREFIXES {
            let class = format!("{}{}", prefix, name);
            if classes.contains(&class) {
                let _ = writeln!(css, ".{} {{ {}: var(--color-{}); }}", class, property, name);
            }
        }
    }

    let unknown: Vec<String> = classes
        .iter()
        .filter(|c| !is_known(c, config))
        .cloned()
        .collect();

    for class in &unknown {
        tracing::warn!(class = %class, "no style rule for class, it will be unstyled");
    }

    Stylesheet { css, unknown }
}

/// Every class name used anywhere in a rendered HTML document
pub fn classes_in(html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .flat_map(|el| el.value().classes().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

fn is_known(class: &str, config: &ThemeConfig) -> bool {
    if UTILITIES.iter().any(|u| u.class == class) {
        return true;
    }
    THEME_PREFIXES.iter().any(|(prefix, _)| {
        class
            .strip_prefix(prefix)
            .is_some_and(|name| config.palette().get(name).is_some())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdb_site_core::parse_theme_toml_str;

    fn classes(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_classes_in_collects_every_element() {
        let found = classes_in(
            r#"<!DOCTYPE html><html><body class="min-h-screen  bg-white"><main class="flex"><p class="flex text-sm">x</p></main></body></html>"#,
        );
        let found: Vec<_> = found.into_iter().collect();
        assert_eq!(found, ["bg-white", "flex", "min-h-screen", "text-sm"]);
    }

    #[test]
    fn test_classes_in_ignores_unclassed_markup() {
        assert!(classes_in("<p>plain</p>").is_empty());
    }

    #[test]
    fn test_compile_emits_palette_variables() {
        let sheet = compile(&ThemeConfig::default(), &BTreeSet::new());
        assert!(sheet.css.contains("--color-background: #ffffff;"));
        assert!(sheet.css.contains("--color-foreground: #0f172a;"));
        assert!(sheet.css.contains("--color-accent: #ef4444;"));
        assert!(sheet.unknown.is_empty());
    }

    #[test]
    fn test_compile_only_emits_used_utilities() {
        let sheet = compile(&ThemeConfig::default(), &classes(&["flex", "text-sm"]));
        assert!(sheet.css.contains(".flex { display: flex; }"));
        assert!(sheet.css.contains(".text-sm {"));
        assert!(!sheet.css.contains(".flex-col"));
        assert!(!sheet.css.contains(".min-h-screen"));
    }

    #[test]
    fn test_compile_space_utility_selector() {
        let sheet = compile(&ThemeConfig::default(), &classes(&["space-y-6"]));
        assert!(
            sheet
                .css
                .contains(".space-y-6 > :not([hidden]) ~ :not([hidden]) { margin-top: 1.5rem; }")
        );
    }

    #[test]
    fn test_compile_line_height_follows_font_size() {
        let sheet = compile(
            &ThemeConfig::default(),
            &classes(&["leading-relaxed", "text-sm"]),
        );
        let size = sheet.css.find(".text-sm").unwrap();
        let leading = sheet.css.find(".leading-relaxed").unwrap();
        assert!(size < leading);
    }

    #[test]
    fn test_compile_theme_utilities() {
        let sheet = compile(
            &ThemeConfig::default(),
            &classes(&["bg-background", "text-foreground", "border-accent"]),
        );
        assert!(
            sheet
                .css
                .contains(".bg-background { background-color: var(--color-background); }")
        );
        assert!(
            sheet
                .css
                .contains(".text-foreground { color: var(--color-foreground); }")
        );
        assert!(
            sheet
                .css
                .contains(".border-accent { border-color: var(--color-accent); }")
        );
        assert!(sheet.unknown.is_empty());
    }

    #[test]
    fn test_compile_uses_configured_colors() {
        let config = parse_theme_toml_str(
            r##"
[theme.extend.colors]
background = "#000000"
foreground = "#ffffff"
accent = "#22c55e"
            "##,
        )
        .unwrap();
        let sheet = compile(&config, &BTreeSet::new());
        assert!(sheet.css.contains("--color-accent: #22c55e;"));
        assert!(!sheet.css.contains("#ef4444"));
    }

    #[test]
    fn test_compile_reports_unknown_classes() {
        let sheet = compile(
            &ThemeConfig::default(),
            &classes(&["flex", "text-primary", "grid-cols-7"]),
        );
        assert_eq!(sheet.unknown, ["grid-cols-7", "text-primary"]);
        assert!(!sheet.css.contains("grid-cols-7"));
    }
}
