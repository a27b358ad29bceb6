//! URL hostname resolution
//!
//! Extracts the host component of a URL; scheme, path and query are ignored.

use url::Url;

use crate::errors::{IpLocatorError, Result};

/// Resolve the hostname of a URL.
///
/// Fails when the input cannot be parsed as a URL or has no host component
/// (e.g. `mailto:` or a bare path).
pub fn resolve_hostname(url: &str) -> Result<String> {
    let parsed = Url::parse(url.trim()).map_err(|e| {
        IpLocatorError::hostname_resolution(format!("Error resolving hostname: {}", e))
    })?;

    match parsed.host_str() {
        Some(host) => Ok(host.to_string()),
        None => Err(IpLocatorError::hostname_resolution(format!(
            "URL has no host component: {}",
            url
        ))),
    }
}
