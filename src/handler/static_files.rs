//! Static file serving module
//!
//! Resolves request paths inside the root directory, guards against
//! traversal, and serves files, index pages and directory listings.

use crate::config::ServerConfig;
use crate::handler::router::RequestContext;
use crate::http::response;
use crate::logger;
use chrono::{DateTime, Utc};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Index files tried when a directory is requested.
const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Serve `ctx.path` from the configured root directory.
pub async fn serve(ctx: &RequestContext<'_>, config: &ServerConfig) -> Response<Full<Bytes>> {
    let decoded = urlencoding::decode(ctx.path)
        .map_or_else(|_| ctx.path.to_string(), |p| p.into_owned());

    let Some(resolved) = resolve_path(&config.root_dir, &decoded) else {
        return response::build_404_response();
    };

    if resolved.is_dir() {
        // Relative hrefs in a listing only resolve correctly behind a
        // trailing slash, so redirect first.
        if !decoded.ends_with('/') {
            let location = match ctx.query {
                Some(query) => format!("{}/?{query}", ctx.path),
                None => format!("{}/", ctx.path),
            };
            return response::build_redirect_response(&location);
        }
        for index in INDEX_FILES {
            let candidate = resolved.join(index);
            if candidate.is_file() {
                return serve_file(&candidate, ctx.is_head).await;
            }
        }
        return serve_listing(&resolved, &decoded, ctx.is_head).await;
    }

    serve_file(&resolved, ctx.is_head).await
}

/// Join a decoded request path to the root and make sure the result stays
/// inside it.
///
/// Canonicalization resolves `..` segments and symlinks; a path that
/// cannot be canonicalized does not exist. Returns `None` for both unknown
/// paths and traversal attempts, which the caller turns into a 404.
fn resolve_path(root: &Path, decoded_path: &str) -> Option<PathBuf> {
    let relative = decoded_path.trim_start_matches('/');
    let joined = root.join(relative);

    let canonical = joined.canonicalize().ok()?;
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            decoded_path,
            canonical.display()
        ));
        return None;
    }
    Some(canonical)
}

/// Read a file and build its 200 response.
async fn serve_file(path: &Path, is_head: bool) -> Response<Full<Bytes>> {
    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return response::build_404_response();
        }
    };

    let content_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
    let last_modified = last_modified_header(path).await;

    response::build_file_response(
        Bytes::from(content),
        &content_type,
        last_modified.as_deref(),
        is_head,
    )
}

/// RFC 7231 `Last-Modified` value from the file's mtime.
async fn last_modified_header(path: &Path) -> Option<String> {
    let metadata = fs::metadata(path).await.ok()?;
    let modified: DateTime<Utc> = metadata.modified().ok()?.into();
    Some(modified.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

struct ListingEntry {
    name: String,
    is_dir: bool,
}

/// Plain HTML directory listing, entries sorted by name.
async fn serve_listing(dir: &Path, request_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    let mut entries = match read_entries(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            logger::log_warning(&format!("Cannot list directory '{}': {e}", dir.display()));
            return response::build_404_response();
        }
    };
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    response::build_html_response(render_listing(request_path, &entries), is_head)
}

async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: entry.file_type().await.is_ok_and(|t| t.is_dir()),
        });
    }
    Ok(entries)
}

fn render_listing(request_path: &str, entries: &[ListingEntry]) -> String {
    let title = escape_html(&format!("Directory listing for {request_path}"));

    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for entry in entries {
        let mut href = urlencoding::encode(&entry.name).into_owned();
        let mut display = entry.name.clone();
        if entry.is_dir {
            href.push('/');
            display.push('/');
        }
        html.push_str(&format!(
            "<li><a href=\"{href}\">{}</a></li>\n",
            escape_html(&display)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

/// Escape text for inclusion in HTML.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
