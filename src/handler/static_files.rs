//! Static file serving module
//!
//! Resolves request paths against the serving root, serves files with MIME
//! detection and `ETag` validation, and renders a directory listing when a
//! directory has no index file.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

const INDEX_FILES: &[&str] = &["index.html", "index.htm"];

/// What a request path resolved to under the root.
enum Resolved {
    File { content: Vec<u8>, content_type: &'static str },
    Listing(String),
    Redirect(String),
}

/// Serve a GET/HEAD request for `ctx.path` from `root`.
pub async fn serve(ctx: &RequestContext<'_>, root: &Path) -> Response<Full<Bytes>> {
    match resolve(root, ctx.path).await {
        Some(Resolved::File { content, content_type }) => {
            if ctx.access_log {
                logger::log_response(200, content.len());
            }
            build_file_response(&content, content_type, ctx.if_none_match.as_deref(), ctx.is_head)
        }
        Some(Resolved::Listing(html)) => {
            if ctx.access_log {
                logger::log_response(200, html.len());
            }
            response::build_html_response(html, ctx.is_head)
        }
        Some(Resolved::Redirect(target)) => {
            if ctx.access_log {
                logger::log_response(301, 0);
            }
            response::build_redirect_response(&target)
        }
        None => {
            if ctx.access_log {
                logger::log_response(404, 0);
            }
            http::build_404_response()
        }
    }
}

/// Resolve a request path to a file or a directory listing.
///
/// Returns `None` for anything that should 404: nonexistent paths, paths
/// escaping the root, unreadable files.
async fn resolve(root: &Path, request_path: &str) -> Option<Resolved> {
    // Strip the leading slash and any traversal segments up front;
    // canonicalization below is the authoritative containment check.
    let clean_path = request_path.trim_start_matches('/').replace("..", "");

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Serving root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    let mut file_path = root_canonical.join(&clean_path);

    if file_path.is_dir() {
        // Containment check before anything is revealed about the
        // directory, redirects included.
        let dir_canonical = file_path.canonicalize().ok()?;
        if !dir_canonical.starts_with(&root_canonical) {
            return None;
        }
        // Relative hrefs in a listing resolve against the parent unless
        // the directory URL ends with a slash; redirect first.
        if !request_path.ends_with('/') {
            return Some(Resolved::Redirect(format!("{request_path}/")));
        }
        match pick_index(&dir_canonical).await {
            Some(index_path) => file_path = index_path,
            None => {
                let html = render_listing(&dir_canonical, request_path).await?;
                return Some(Resolved::Listing(html));
            }
        }
    }

    let file_canonical = file_path.canonicalize().ok()?;
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            file_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_canonical.extension().and_then(|e| e.to_str()));

    Some(Resolved::File { content, content_type })
}

/// First existing index file inside `dir`, if any.
async fn pick_index(dir: &Path) -> Option<PathBuf> {
    for index_file in INDEX_FILES {
        let candidate = dir.join(index_file);
        if fs::metadata(&candidate).await.map(|m| m.is_file()).unwrap_or(false) {
            return Some(candidate);
        }
    }
    None
}

/// Render a minimal HTML directory listing, entries sorted by name.
async fn render_listing(dir: &Path, request_path: &str) -> Option<String> {
    let mut entries = fs::read_dir(dir).await.ok()?;
    let mut names = Vec::new();

    while let Ok(Some(entry)) = entries.next_entry().await {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let title = escape_html(request_path);
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!("    <title>Directory listing for {title}</title>\n"));
    html.push_str("    <meta charset=\"utf-8\">\n</head>\n<body>\n");
    html.push_str(&format!("    <h1>Directory listing for {title}</h1>\n    <hr>\n    <ul>\n"));
    for name in &names {
        let escaped = escape_html(name);
        html.push_str(&format!("        <li><a href=\"{escaped}\">{escaped}</a></li>\n"));
    }
    html.push_str("    </ul>\n    <hr>\n</body>\n</html>\n");

    Some(html)
}

/// Escape text for embedding in listing HTML.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Build the 200/304 response for a file body.
fn build_file_response(
    data: &[u8],
    content_type: &'static str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    response::build_file_response(Bytes::from(data.to_owned()), content_type, &etag, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_names() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_html("plain.html"), "plain.html");
    }

    #[tokio::test]
    async fn listing_contains_sorted_entries() {
        let dir = std::env::temp_dir().join(format!("camserve-listing-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("sub")).unwrap();
        std::fs::write(dir.join("b.html"), "b").unwrap();
        std::fs::write(dir.join("a.js"), "a").unwrap();

        let html = render_listing(&dir, "/").await.expect("listing should render");
        assert!(html.contains("Directory listing for /"));
        let a = html.find("a.js").unwrap();
        let b = html.find("b.html").unwrap();
        let sub = html.find("sub/").unwrap();
        assert!(a < b && b < sub);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn traversal_resolves_to_none() {
        let dir = std::env::temp_dir().join(format!("camserve-traversal-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("page.html"), "<html></html>").unwrap();

        assert!(resolve(&dir, "/../../etc/passwd").await.is_none());
        // Directory outside the root: no redirect, no listing.
        assert!(resolve(&dir, "/..//etc").await.is_none());
        assert!(resolve(&dir, "/missing.html").await.is_none());
        assert!(matches!(
            resolve(&dir, "/page.html").await,
            Some(Resolved::File { .. })
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn directory_without_trailing_slash_redirects() {
        let dir = std::env::temp_dir().join(format!("camserve-dirslash-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("sub")).unwrap();
        std::fs::write(dir.join("sub").join("page.html"), "<html></html>").unwrap();

        match resolve(&dir, "/sub").await {
            Some(Resolved::Redirect(target)) => assert_eq!(target, "/sub/"),
            _ => panic!("expected redirect for directory without trailing slash"),
        }
        assert!(matches!(
            resolve(&dir, "/sub/").await,
            Some(Resolved::Listing(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
