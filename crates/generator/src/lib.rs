// Static site generation with maud: layout + pages composed as markup, plus
// a stylesheet compiled from the classes the rendered pages use.

pub mod home;
pub mod layout;
pub mod styles;

use maud::{PreEscaped, html};
use vdb_site_core::ThemeConfig;

/// Path of the generated stylesheet, relative to the site root
pub const STYLESHEET_PATH: &str = "styles.css";

/// Hot reload via Server-Sent Events, preview builds only
const RELOAD_SCRIPT: &str = r#"<script>
    const eventSource = new EventSource('/_reload');
    eventSource.onmessage = () => location.reload();
    eventSource.onerror = () => eventSource.close();
</script>"#;

pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, html)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
    /// Classes the pages use that the stylesheet has no rule for
    pub unstyled_classes: Vec<String>,
}

impl GeneratedSite {
    pub fn page(&self, path: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, html)| html.as_str())
    }

    pub fn asset(&self, path: &str) -> Option<&[u8]> {
        self.assets
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, data)| data.as_slice())
    }
}

/// Generate the deployable site
pub fn generate_site(config: &ThemeConfig) -> GeneratedSite {
    build(config, false)
}

/// Generate the site for the local preview server (adds live reload)
pub fn generate_preview_site(config: &ThemeConfig) -> GeneratedSite {
    build(config, true)
}

fn build(config: &ThemeConfig, is_preview: bool) -> GeneratedSite {
    let head = html! {
        title { (home::HOME_CONTENT.title) }
        link rel="stylesheet" href=(STYLESHEET_PATH);
        @if is_preview {
            (PreEscaped(RELOAD_SCRIPT))
        }
    };
    let html = layout::root_layout_with_head(head, home::home_page()).into_string();

    let classes = styles::classes_in(&html);
    let sheet = styles::compile(config, &classes);

    tracing::debug!(
        classes = classes.len(),
        unstyled = sheet.unknown.len(),
        preview = is_preview,
        "generated index page"
    );

    GeneratedSite {
        pages: vec![("index.html".to_string(), html)],
        assets: vec![(STYLESHEET_PATH.to_string(), sheet.css.into_bytes())],
        unstyled_classes: sheet.unknown,
    }
}
