use maud::{Markup, html};
use vdb_site_core::PageContent;

/// Landing page text
pub const HOME_CONTENT: PageContent = PageContent {
    title: "Self-Healing Vector DB",
    tagline: "A Rust + HNSW + SQLite experimental vector database that can detect \
              issues and rebuild itself from durable storage.",
    paragraphs: [
        "This project explores what it would look like if a vector database \
         could actively maintain its own health. Instead of silently degrading \
         over time, it keeps raw vectors in SQLite and uses an in-memory HNSW \
         index for fast approximate nearest-neighbor search.",
        "On startup, the engine bootstraps the HNSW index from SQLite. If the \
         index is ever corrupted or needs to be rebuilt, the system can \
         reconstruct it from the stored source of truth. Over time, the goal is \
         to add recall testing, drift detection, and automatic self-repair.",
        "The backend is written in Rust using Axum for the HTTP API, hnsw_rs for \
         the ANN index, and SQLite for storage. A future iteration will plug in \
         an ONNX model or external embedding API so you can index raw text \
         instead of precomputed vectors.",
        "This page is just a tiny log of the journey: from a simple prototype to \
         a more serious, self-aware vector store that measures and improves its \
         own quality.",
    ],
};

/// Render the landing page body
pub fn home_page() -> Markup {
    render_page(&HOME_CONTENT)
}

fn render_page(content: &PageContent) -> Markup {
    html! {
        main class="flex min-h-screen flex-col items-center px-6 py-12" {
            div class="w-full max-w-3xl" {
                header class="mb-10 border-b border-slate-200 pb-6" {
                    h1 class="text-3xl font-semibold tracking-tight text-red-600" {
                        (content.title)
                    }
                    p class="mt-3 text-sm text-red-500" {
                        (content.tagline)
                    }
                }
                section class="space-y-6 text-sm leading-relaxed text-black" {
                    @for text in content.paragraphs {
                        p { (text) }
                    }
                }
            }
        }
    }
}
