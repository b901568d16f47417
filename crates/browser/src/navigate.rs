//! Navigation with request filtering and a bounded wait for DOM readiness.

use std::time::Duration;

use {
    chromiumoxide::cdp::browser_protocol::network::{
        EnableParams, SetBlockedUrLsParams, SetUserAgentOverrideParams,
    },
    tracing::debug,
    url::Url,
};

use crate::{error::BrowserError, launch::BrowserSession};

/// Realistic desktop user agent, used when no override is configured.
/// Reduces bot-blocking false negatives on pages that sniff headless clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Resolves once the DOM is past `loading`, without waiting for subresources.
/// Full network idle is deliberately not awaited; latency is bounded over
/// completeness.
const WAIT_DOM_READY_JS: &str = r#"
new Promise((resolve) => {
    if (document.readyState === 'complete' || document.readyState === 'interactive') {
        resolve(document.readyState);
    } else {
        document.addEventListener('DOMContentLoaded', () => resolve(document.readyState));
    }
})
"#;

/// Request-filtering policy installed before navigation begins.
///
/// Blocks resource categories that are expensive or commonly cause
/// cross-origin/tracking noise. Everything else passes through unmodified.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    patterns: Vec<String>,
}

impl RequestFilter {
    /// Build a filter from raw URL patterns (CDP wildcard syntax) and
    /// analytics/tracking host fragments.
    pub fn new(resource_patterns: &[String], host_fragments: &[String]) -> Self {
        let mut patterns: Vec<String> = resource_patterns.to_vec();
        patterns.extend(host_fragments.iter().map(|h| format!("*{h}*")));
        Self { patterns }
    }

    /// The CDP block patterns this filter installs.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl From<&sitelens_config::AnalysisConfig> for RequestFilter {
    fn from(cfg: &sitelens_config::AnalysisConfig) -> Self {
        Self::new(&cfg.blocked_resource_patterns, &cfg.blocked_host_fragments)
    }
}

/// Drive the session's page to `url` under `timeout`.
///
/// One best-effort attempt; every failure mode (DNS, TLS, redirect loop,
/// timeout) collapses to [`BrowserError::NavigationFailed`]. The session is
/// NOT torn down here; the caller owns teardown on all paths.
pub async fn navigate(
    session: &BrowserSession,
    url: &Url,
    timeout: Duration,
    user_agent: Option<&str>,
    filter: &RequestFilter,
) -> Result<(), BrowserError> {
    let result = tokio::time::timeout(timeout, navigate_inner(session, url, user_agent, filter));

    match result.await {
        Ok(inner) => inner,
        Err(_) => Err(BrowserError::NavigationFailed(format!(
            "navigation timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}

async fn navigate_inner(
    session: &BrowserSession,
    url: &Url,
    user_agent: Option<&str>,
    filter: &RequestFilter,
) -> Result<(), BrowserError> {
    let page = session.page();
    let ua = user_agent.unwrap_or(DEFAULT_USER_AGENT);

    page.execute(EnableParams::default())
        .await
        .map_err(|e| BrowserError::NavigationFailed(format!("network enable: {e}")))?;

    page.execute(SetUserAgentOverrideParams::new(ua.to_string()))
        .await
        .map_err(|e| BrowserError::NavigationFailed(format!("user agent override: {e}")))?;

    if !filter.patterns().is_empty() {
        page.execute(SetBlockedUrLsParams::new(filter.patterns().to_vec()))
            .await
            .map_err(|e| BrowserError::NavigationFailed(format!("request filter: {e}")))?;
        debug!(
            patterns = filter.patterns().len(),
            "installed request filter"
        );
    }

    page.goto(url.as_str())
        .await
        .map_err(|e| BrowserError::NavigationFailed(e.to_string()))?;

    let ready_state: String = page
        .evaluate(WAIT_DOM_READY_JS)
        .await
        .map_err(|e| BrowserError::NavigationFailed(format!("readiness wait: {e}")))?
        .into_value()
        .unwrap_or_else(|_| "unknown".to_string());

    debug!(url = %url, ready_state, "navigated to URL");

    Ok(())
}
