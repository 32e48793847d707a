use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use maud::{DOCTYPE, html};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use vdb_site_generator::{GeneratedSite, STYLESHEET_PATH, generate_preview_site};

use super::{config_path, load_config};

#[derive(Clone)]
struct AppState {
    /// Explicit --config, if any; re-read on every request
    config: Option<PathBuf>,
    reload_tx: broadcast::Sender<()>,
}

/// Start preview server with hot reload for local development.
///
/// This command:
/// - Validates the theme configuration once up front
/// - Regenerates the page and stylesheet on every request
/// - Watches the config file and triggers a browser reload when it changes
///
/// # Arguments
///
/// * `config` - Optional path to site.toml
/// * `port` - Port to serve on (default: 8080)
pub async fn run(config: Option<PathBuf>, port: u16) -> Result<()> {
    println!("🔭 Starting preview server...");

    let theme = load_config(config.as_deref())?;
    println!("   ✓ Theme loaded ({} content paths)", theme.content.len());

    // Create broadcast channel for reload events
    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        config: config.clone(),
        reload_tx: reload_tx.clone(),
    };

    let app = router(state);

    // Start file watcher
    let watched = config_path(config.as_deref());
    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_config(watched, watcher_tx).await {
            tracing::error!("File watcher error: {:#}", e);
        }
    });

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route(&format!("/{}", STYLESHEET_PATH), get(stylesheet_handler))
        .route("/_reload", get(sse_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Watch the config file's directory and trigger reload when the file changes
async fn watch_config(config: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    // Editors often replace files instead of writing in place, so watch the
    // parent directory rather than the file itself
    let dir = match config.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    tracing::debug!(dir = %dir.display(), "watching for config changes");

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                if event.paths.iter().any(|p| is_same_file_name(p, &config)) {
                    println!("   📝 Config changed, reloading...");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn is_same_file_name(changed: &Path, config: &Path) -> bool {
    changed.file_name().is_some() && changed.file_name() == config.file_name()
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(()) => {
                    yield Ok(Event::default().data("reload"));
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Regenerate the site from the current config, or render the load error
fn render_site(state: &AppState) -> std::result::Result<GeneratedSite, Response> {
    match load_config(state.config.as_deref()) {
        Ok(theme) => Ok(generate_preview_site(&theme)),
        Err(e) => {
            tracing::warn!("preview config error: {:#}", e);
            let body = html! {
                (DOCTYPE)
                html lang="en" {
                    head { title { "Error" } }
                    body {
                        h1 { "Configuration Error" }
                        pre { (format!("{:#}", e)) }
                    }
                }
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Html(body.into_string())).into_response())
        }
    }
}

/// Main index page handler
async fn index_handler(State(state): State<AppState>) -> Response {
    let site = match render_site(&state) {
        Ok(site) => site,
        Err(response) => return response,
    };

    match site.page("index.html") {
        Some(html) => Html(html.to_string()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn stylesheet_handler(State(state): State<AppState>) -> Response {
    let site = match render_site(&state) {
        Ok(site) => site,
        Err(response) => return response,
    };

    match site.asset(STYLESHEET_PATH) {
        Some(css) => (
            [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
            css.to_vec(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
