//! The per-request analysis pipeline.
//!
//! Stages run strictly sequentially: acquire → navigate → extract →
//! aggregate. The session acquired in the first stage is torn down exactly
//! once on every exit path, before the result or error is returned.

use std::time::{Duration, Instant};

use {tracing::info, url::Url};

use {
    sitelens_browser::{
        BrowserConfig, BrowserError, BrowserSession, RequestFilter, acquire, extract, navigate,
    },
    sitelens_config::SitelensConfig,
};

use crate::{
    aggregate::aggregate,
    signatures::probe_globals,
    types::{AnalysisLimits, AnalysisResult},
};

/// Runs analysis requests. One instance is shared across all concurrent
/// requests; each call owns its own browser session.
pub struct Analyzer {
    browser: BrowserConfig,
    limits: AnalysisLimits,
    filter: RequestFilter,
    navigation_timeout: Duration,
}

impl Analyzer {
    pub fn new(config: &SitelensConfig) -> Self {
        Self {
            browser: BrowserConfig::from(&config.browser),
            limits: AnalysisLimits::from(&config.analysis),
            filter: RequestFilter::from(&config.analysis),
            navigation_timeout: Duration::from_millis(config.browser.navigation_timeout_ms),
        }
    }

    /// Analyze one page.
    ///
    /// `url` must already be validated as an absolute http/https URL; that
    /// happens at the routing layer before any browser work.
    pub async fn analyze(&self, url: &Url) -> Result<AnalysisResult, BrowserError> {
        let start = Instant::now();

        // Launch failure leaves nothing to tear down.
        let session = acquire(&self.browser).await?;

        let result = self.run_stages(&session, url).await;

        // Teardown runs on success and on every stage failure alike; its own
        // failures are logged inside and never surface here.
        session.teardown().await;

        match &result {
            Ok(analysis) => info!(
                url = %url,
                duration_ms = start.elapsed().as_millis() as u64,
                colors = analysis.colors.len(),
                fonts = analysis.fonts.len(),
                technologies = analysis.technologies.len(),
                "analysis complete"
            ),
            Err(e) => info!(
                url = %url,
                duration_ms = start.elapsed().as_millis() as u64,
                error = %e,
                "analysis failed"
            ),
        }

        result
    }

    async fn run_stages(
        &self,
        session: &BrowserSession,
        url: &Url,
    ) -> Result<AnalysisResult, BrowserError> {
        navigate(
            session,
            url,
            self.navigation_timeout,
            self.browser.user_agent.as_deref(),
            &self.filter,
        )
        .await?;

        let signals = extract(session, &probe_globals()).await?;

        Ok(aggregate(&signals, &self.limits))
    }
}
