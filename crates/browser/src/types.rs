//! Runtime browser configuration.

use serde::{Deserialize, Serialize};
pub use sitelens_config::BrowserEnvironment;

/// Browser configuration as used by the launch/navigate layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Launch strategy, selected once at startup.
    pub environment: BrowserEnvironment,
    /// Path to Chrome/Chromium binary (auto-detected if not set).
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
    #[serde(default)]
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

impl From<&sitelens_config::BrowserConfig> for BrowserConfig {
    fn from(cfg: &sitelens_config::BrowserConfig) -> Self {
        Self {
            environment: cfg.environment,
            chrome_path: cfg.chrome_path.clone(),
            headless: cfg.headless,
            viewport_width: cfg.viewport_width,
            viewport_height: cfg.viewport_height,
            navigation_timeout_ms: cfg.navigation_timeout_ms,
            user_agent: cfg.user_agent.clone(),
            extra_args: cfg.extra_args.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_headless_local() {
        let config = BrowserConfig::default();
        assert_eq!(config.environment, BrowserEnvironment::Local);
        assert!(config.headless);
        assert_eq!(config.navigation_timeout_ms, 15_000);
    }

    #[test]
    fn from_schema_config_carries_overrides() {
        let schema = sitelens_config::BrowserConfig {
            environment: BrowserEnvironment::Sandboxed,
            chrome_path: Some("/opt/chromium/chrome".into()),
            user_agent: Some("test-agent".into()),
            ..Default::default()
        };
        let config = BrowserConfig::from(&schema);
        assert_eq!(config.environment, BrowserEnvironment::Sandboxed);
        assert_eq!(config.chrome_path.as_deref(), Some("/opt/chromium/chrome"));
        assert_eq!(config.user_agent.as_deref(), Some("test-agent"));
    }
}
