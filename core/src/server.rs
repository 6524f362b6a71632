//! # Directory Server
//!
//! Builds the HTTP router that serves a directory tree, with a best-effort access log in
//! front of it. Logging never fails or delays a request beyond a single `stat`.
//!
//! Files and `index.html` pages come from [`ServeDir`]. Directories without an index page
//! get a plain link listing so a phone browser can navigate the share.

use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::extract::{ConnectInfo, Request, State};
use axum::handler::Handler;
use axum::http::{StatusCode, Uri, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use tower_http::services::ServeDir;
use tracing::info;

/// A regular file that a request path resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedFile {
    pub path: PathBuf,
    pub size: u64,
}

// Characters escaped in listing links, on top of control characters.
const HREF_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Router serving every file below `directory`.
pub fn router(directory: impl Into<PathBuf>) -> Router {
    let root: Arc<PathBuf> = Arc::new(directory.into());
    let listing = directory_listing.with_state(root.clone());
    Router::new()
        .fallback_service(ServeDir::new(root.as_path()).fallback(listing))
        .layer(middleware::from_fn_with_state(root, log_request))
}

async fn log_request(State(root): State<Arc<PathBuf>>, request: Request, next: Next) -> Response {
    let remote: String = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let path: &str = request.uri().path();
    info!("{} {} {}", remote, request.method(), percent_decode_str(path).decode_utf8_lossy());

    if let Some(file) = served_file(&root, path).await {
        info!("{} [{}]", file.path.display(), file.size);
    }

    next.run(request).await
}

/// Resolves a request path to a regular file inside `root`.
///
/// Returns `None` for directories, missing entries and paths that would leave `root`.
pub async fn served_file(root: &Path, url_path: &str) -> Option<ServedFile> {
    let relative: PathBuf = sanitize(url_path)?;
    let path: PathBuf = root.join(relative);
    let metadata = tokio::fs::metadata(&path).await.ok()?;
    if !metadata.is_file() {
        return None;
    }
    Some(ServedFile {
        path,
        size: metadata.len(),
    })
}

async fn directory_listing(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let Some(relative) = sanitize(uri.path()) else {
        return not_found();
    };
    match list_entries(&root.join(relative)).await {
        Some(entries) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            render_listing(&entries),
        )
            .into_response(),
        None => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
}

/// Sorted entry names of `dir`, directories suffixed with `/`.
async fn list_entries(dir: &Path) -> Option<Vec<String>> {
    let mut read_dir = tokio::fs::read_dir(dir).await.ok()?;
    let mut entries: Vec<String> = Vec::new();
    while let Ok(Some(entry)) = read_dir.next_entry().await {
        let mut name: String = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();
    Some(entries)
}

fn render_listing(entries: &[String]) -> String {
    let mut html = String::from(
        "<!doctype html>\n<meta name=\"viewport\" content=\"width=device-width\">\n<pre>\n",
    );
    for name in entries {
        let href = utf8_percent_encode(name, HREF_ESCAPE);
        html.push_str(&format!("<a href=\"{href}\">{}</a>\n", escape_html(name)));
    }
    html.push_str("</pre>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn sanitize(url_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(url_path).decode_utf8().ok()?;
    let mut relative = PathBuf::new();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(relative)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
