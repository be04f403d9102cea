//! Static asset serving module
//!
//! Loads files from the configured assets directory, resolving index
//! files for directory requests and guarding against path traversal.

use crate::config::AssetsConfig;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve the asset the request path points at, or 404.
pub async fn serve(path: &str, assets: &AssetsConfig) -> Response<Full<Bytes>> {
    match load(path, assets).await {
        Some((content, content_type)) => {
            http::build_file_response(Bytes::from(content), content_type)
        }
        None => http::build_404_response(),
    }
}

/// Resolve and read an asset file.
///
/// Returns the file contents and Content-Type, or `None` when the path
/// does not resolve to a readable file inside the assets directory.
async fn load(path: &str, assets: &AssetsConfig) -> Option<(Vec<u8>, &'static str)> {
    // Remove leading slash and flatten traversal sequences
    let clean_path = path.trim_start_matches('/').replace("..", "");

    // Remove the route prefix from the request path
    let prefix = assets.route_prefix.trim_matches('/');
    let relative_path = if prefix.is_empty() || clean_path == prefix {
        ""
    } else {
        clean_path
            .strip_prefix(&format!("{prefix}/"))
            .unwrap_or(&clean_path)
    };

    let assets_root = match Path::new(&assets.dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Assets directory not found or inaccessible '{}': {e}",
                assets.dir
            ));
            return None;
        }
    };

    let mut file_path = Path::new(&assets.dir).join(relative_path);

    // Directory requests fall back to the configured index files
    if file_path.is_dir() || relative_path.is_empty() || relative_path.ends_with('/') {
        file_path = resolve_index(&file_path, &assets.index_files)?;
    }

    // File not found is an ordinary 404, no need to log
    let resolved = file_path.canonicalize().ok()?;
    if !resolved.starts_with(&assets_root) {
        logger::log_warning(&format!("Path traversal attempt blocked: {path}"));
        return None;
    }

    let content = match fs::read(&resolved).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                resolved.display()
            ));
            return None;
        }
    };

    let content_type = mime::content_type(resolved.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// First configured index file that exists under `dir`.
fn resolve_index(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    index_files
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}
