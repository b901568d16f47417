//! Config schema types (server, browser provisioning, analysis policy).

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitelensConfig {
    pub server: ServerConfig,
    pub browser: BrowserConfig,
    pub analysis: AnalysisConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to. Defaults to "127.0.0.1".
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
    /// Include underlying error details in failure responses.
    /// Leave off in production-facing deployments.
    pub debug_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 8270,
            debug_errors: false,
        }
    }
}

/// Which browser-provisioning strategy to use.
///
/// Selected once at startup from config, never per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserEnvironment {
    /// Unconstrained developer machine: detect an installed browser.
    #[default]
    Local,
    /// Constrained sandbox: statically-provisioned minimal binary,
    /// restricted launch flags.
    Sandboxed,
}

/// Browser provisioning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Launch strategy to use.
    pub environment: BrowserEnvironment,
    /// Path to a Chrome/Chromium binary (auto-detected if not set).
    pub chrome_path: Option<String>,
    /// Whether to run in headless mode.
    pub headless: bool,
    /// Viewport width.
    pub viewport_width: u32,
    /// Viewport height.
    pub viewport_height: u32,
    /// Navigation timeout in milliseconds.
    pub navigation_timeout_ms: u64,
    /// User agent string (uses a realistic desktop default if not set).
    pub user_agent: Option<String>,
    /// Additional Chrome arguments.
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            environment: BrowserEnvironment::Local,
            chrome_path: None,
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            navigation_timeout_ms: 15_000,
            user_agent: None,
            extra_args: Vec::new(),
        }
    }
}

/// Analysis policy: noise filters and result caps.
///
/// The block lists are policy data, not hard-coded fact; deployments tune
/// them without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum occurrence count for a color to appear in results.
    pub color_noise_threshold: u32,
    /// Maximum number of colors reported.
    pub max_colors: usize,
    /// Maximum number of fonts reported.
    pub max_fonts: usize,
    /// URL patterns blocked before navigation (CDP wildcard syntax).
    pub blocked_resource_patterns: Vec<String>,
    /// Host fragments of analytics/tracking endpoints blocked before
    /// navigation.
    pub blocked_host_fragments: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            color_noise_threshold: 3,
            max_colors: 15,
            max_fonts: 8,
            blocked_resource_patterns: vec![
                "*.woff".into(),
                "*.woff2".into(),
                "*.ttf".into(),
                "*.otf".into(),
                "*.png".into(),
                "*.jpg".into(),
                "*.jpeg".into(),
                "*.gif".into(),
                "*.webp".into(),
                "*.svg".into(),
                "*.mp4".into(),
                "*.webm".into(),
            ],
            blocked_host_fragments: vec![
                "google-analytics.com".into(),
                "googletagmanager.com".into(),
                "doubleclick.net".into(),
                "facebook.net".into(),
                "hotjar.com".into(),
                "segment.io".into(),
                "mixpanel.com".into(),
            ],
        }
    }
}
