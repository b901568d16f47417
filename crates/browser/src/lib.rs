//! Managed headless Chrome/Chromium over CDP, one session per analysis.
//!
//! A [`BrowserSession`] owns exactly one browser process and one page. It is
//! created by [`launch::acquire`], driven by [`navigate::navigate`] and
//! [`extract::extract`], and must be released with
//! [`BrowserSession::teardown`] on every exit path.
//!
//! # Example
//!
//! ```ignore
//! use sitelens_browser::{BrowserConfig, acquire, navigate, extract};
//!
//! let config = BrowserConfig::default();
//! let session = acquire(&config).await?;
//! navigate(&session, &url, timeout, None, &filter).await?;
//! let signals = extract(&session, &["React", "Vue"]).await?;
//! session.teardown().await;
//! ```

pub mod detect;
pub mod error;
pub mod extract;
pub mod launch;
pub mod navigate;
pub mod types;

pub use {
    error::BrowserError,
    extract::{ColorSample, MetaTag, RawSignals, extract},
    launch::{BrowserSession, acquire},
    navigate::{DEFAULT_USER_AGENT, RequestFilter, navigate},
    types::BrowserConfig,
};
