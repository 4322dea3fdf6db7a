// src/assets.rs

use crate::errors::ServerError;
use crate::responses::{file_response, ResultResp};
use mime::Mime;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Serves a file from the static directory for a request path.
/// Anything that tries to climb out of `root` is treated as missing.
pub fn serve_static(root: &Path, uri_path: &str) -> ResultResp {
    let path = resolve(root, uri_path).ok_or(ServerError::NotFound)?;

    if !path.is_file() {
        return Err(ServerError::NotFound);
    }

    let bytes = std::fs::read(&path).map_err(|e| {
        warn!(path = %path.display(), "Static file read failed: {e}");
        ServerError::NotFound
    })?;

    file_response(bytes, &content_type(&path))
}

fn resolve(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();

    for segment in uri_path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s if s.contains('\\') || s.contains(':') => return None,
            s => path.push(s),
        }
    }

    if uri_path.ends_with('/') {
        path.push("index.html");
    }

    Some(path)
}

pub fn content_type(path: &Path) -> Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "html" | "htm" => mime::TEXT_HTML_UTF_8,
        "css" => mime::TEXT_CSS_UTF_8,
        "js" => mime::APPLICATION_JAVASCRIPT_UTF_8,
        "json" => mime::APPLICATION_JSON,
        "csv" => mime::TEXT_CSV_UTF_8,
        "txt" => mime::TEXT_PLAIN_UTF_8,
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "woff" => mime::FONT_WOFF,
        "woff2" => mime::FONT_WOFF2,
        "ico" => "image/x-icon"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
