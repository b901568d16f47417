//! Analysis-target URL validation, shared by the HTTP surface and the CLI.

use url::Url;

use crate::error::{Error, Result};

/// Validate a raw analysis target: must be an absolute http/https URL.
///
/// Runs before any browser resource is allocated, so a rejection here costs
/// nothing to clean up.
pub fn validate_analysis_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::message("url is required"));
    }

    let url = Url::parse(raw).map_err(|e| Error::message(format!("invalid url '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::message(format!(
            "unsupported URL scheme '{scheme}', only http/https allowed"
        ))),
    }
}
