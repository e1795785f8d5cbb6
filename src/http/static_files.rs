//! Static asset serving
//!
//! Resolves request paths under the static root and reads the file. Paths
//! that would escape the root, or that land inside the private backend
//! directory, are treated as not found.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use log::{debug, warn};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::StaticFileError;

/// File served for `GET /`
pub const INDEX_FILE: &str = "index.html";

/// Resolves `requested` to a path under `root`.
///
/// Rejects empty paths, `..` components and anything absolute.
pub fn resolve_static_path(root: &Path, requested: &str) -> Result<PathBuf, StaticFileError> {
    let requested = requested.trim_start_matches('/');
    if requested.is_empty() || requested.contains('\0') {
        return Err(StaticFileError::InvalidPath(requested.to_string()));
    }

    let mut resolved = root.to_path_buf();
    for component in Path::new(requested).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(StaticFileError::InvalidPath(requested.to_string()));
            }
        }
    }

    Ok(resolved)
}

/// Content type for a file, chosen by extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

/// Reads the requested asset and builds the response.
///
/// `private_dir` must be canonical; any file whose canonical path lies under
/// it is reported as not found.
pub async fn serve_static(
    root: &Path,
    private_dir: &Path,
    requested: &str,
) -> Result<Response, StaticFileError> {
    let path = resolve_static_path(root, requested)?;

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StaticFileError::NotFound(requested.to_string()));
        }
        Err(e) => return Err(StaticFileError::from(e)),
    };
    if !metadata.is_file() {
        return Err(StaticFileError::NotFound(requested.to_string()));
    }

    if tokio::fs::canonicalize(&path).await?.starts_with(private_dir) {
        warn!("Refusing to serve {} from the backend directory", path.display());
        return Err(StaticFileError::NotFound(requested.to_string()));
    }

    let bytes = tokio::fs::read(&path).await?;
    debug!("Serving {} ({} bytes)", path.display(), bytes.len());

    Ok(([(header::CONTENT_TYPE, content_type_for(&path))], bytes).into_response())
}
