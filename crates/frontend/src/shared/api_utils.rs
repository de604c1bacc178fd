//! API utilities for building request URLs
//!
//! The API base URL is provisioned into localStorage by the admin portal; the
//! embedded configuration supplies a default for local development.

use crate::shared::config::config;
use crate::system::auth::storage;
use crate::system::gateway::transport::normalize_credential;

/// Get the base URL for API requests
///
/// # Returns
/// - The stored base URL, e.g. "https://lab.example.com/api"
/// - The configured default when nothing (or a placeholder) is stored
pub fn api_base() -> String {
    normalize_credential(storage::get_api_base_url())
        .unwrap_or_else(|| config().api.base_url.clone())
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/orders");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Join a base URL and a path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// URL for downloading a stored lab file by its path
pub fn file_download_url(base: &str, path: &str) -> String {
    format!(
        "{}?path={}",
        join_url(base, "/files/download"),
        urlencoding::encode(path)
    )
}

/// Last path segment, used as the saved file name
pub fn file_name_from_path(path: &str) -> String {
    path.rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or("download")
        .to_string()
}
