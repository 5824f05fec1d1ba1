//! Support for library configuration options

use std::path::PathBuf;

use once_cell::sync::Lazy;
use url::Url;

/// The server the mobile app talks to in development.
/// Real deployments pass their own URL to [`Client::new`](crate::client::Client::new)
pub static DEFAULT_SERVER_URL: Lazy<Url> = Lazy::new(|| {
    Url::parse("http://localhost:3000").unwrap(/* this literal is a valid URL */)
});

/// Where preference and session files go unless a caller picks its own paths.
///
/// `std::fs` does not expand `~`, so the home directory is resolved
/// explicitly; processes without one fall back to a relative folder
pub fn default_storage_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config").join("tasklist-sync"),
        None => PathBuf::from(".tasklist-sync"),
    }
}
