use maud::{DOCTYPE, Markup, html};

/// Language declared on every generated document
pub const DOCUMENT_LANG: &str = "en";

/// Body classes: full-viewport minimum height, fixed background and text
/// colors, antialiased text.
pub const BODY_CLASSES: &str = "min-h-screen bg-white text-black antialiased";

/// Wrap page content in the document shell shared by every page.
///
/// The children are embedded as-is; validating them is the caller's job.
pub fn root_layout(children: Markup) -> Markup {
    root_layout_with_head(html! {}, children)
}

/// Same shell, with extra `<head>` content (title, stylesheets, scripts)
/// appended after the charset and viewport metadata.
pub fn root_layout_with_head(head: Markup, children: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(DOCUMENT_LANG) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (head)
            }
            body class=(BODY_CLASSES) {
                (children)
            }
        }
    }
}
