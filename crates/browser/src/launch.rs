//! Session acquisition with environment-specific launch strategies.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use {
    async_trait::async_trait,
    chromiumoxide::{
        Browser, BrowserConfig as CdpBrowserConfig, Handler, Page, handler::viewport::Viewport,
    },
    futures::StreamExt,
    tokio::task::JoinHandle,
    tracing::{debug, info, warn},
};

use crate::{
    detect,
    error::BrowserError,
    types::{BrowserConfig, BrowserEnvironment},
};

/// An exclusively-owned browser process plus one page, scoped to a single
/// analysis request. Never shared across requests.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// The session's single page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Release the browser process.
    ///
    /// Failures are logged and swallowed so teardown can run on every exit
    /// path without masking the original result or error.
    pub async fn teardown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "failed to close browser cleanly");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "failed to reap browser process");
        }
        self.handler_task.abort();
        debug!("browser session torn down");
    }
}

/// Environment-specific browser launch strategy.
///
/// Chosen once from configuration at startup; the pipeline never branches on
/// environment again.
#[async_trait]
pub trait LaunchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Launch a browser process, trying fallback binary locations before
    /// giving up.
    async fn launch(&self, config: &BrowserConfig) -> Result<(Browser, Handler), BrowserError>;
}

/// Detects and launches a locally installed browser with minimal flags.
pub struct LocalLaunch;

/// Launches a statically-provisioned binary with flags restricted for
/// constrained filesystems.
pub struct SandboxedLaunch;

fn local_args() -> Vec<String> {
    ["--disable-gpu", "--disable-dev-shm-usage"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn sandbox_args() -> Vec<String> {
    [
        "--no-sandbox",
        "--disable-setuid-sandbox",
        "--disable-gpu",
        "--disable-dev-shm-usage",
        "--disable-software-rasterizer",
        "--single-process",
        "--no-zygote",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

#[async_trait]
impl LaunchStrategy for LocalLaunch {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn launch(&self, config: &BrowserConfig) -> Result<(Browser, Handler), BrowserError> {
        let candidates = detect::local_candidates(config.chrome_path.as_deref());
        if candidates.is_empty() {
            return Err(BrowserError::LaunchFailed(detect::install_instructions()));
        }
        try_candidates(self.name(), &candidates, &local_args(), config).await
    }
}

#[async_trait]
impl LaunchStrategy for SandboxedLaunch {
    fn name(&self) -> &'static str {
        "sandboxed"
    }

    async fn launch(&self, config: &BrowserConfig) -> Result<(Browser, Handler), BrowserError> {
        let candidates = detect::sandbox_candidates(config.chrome_path.as_deref());
        if candidates.is_empty() {
            return Err(BrowserError::LaunchFailed(
                "no statically-provisioned browser binary found in sandbox locations".into(),
            ));
        }
        try_candidates(self.name(), &candidates, &sandbox_args(), config).await
    }
}

/// Select the launch strategy for the configured environment.
pub fn strategy_for(environment: BrowserEnvironment) -> &'static dyn LaunchStrategy {
    match environment {
        BrowserEnvironment::Local => &LocalLaunch,
        BrowserEnvironment::Sandboxed => &SandboxedLaunch,
    }
}

/// Acquire a browser session for one analysis request.
pub async fn acquire(config: &BrowserConfig) -> Result<BrowserSession, BrowserError> {
    let strategy = strategy_for(config.environment);
    debug!(strategy = strategy.name(), "acquiring browser session");

    let (browser, mut handler) = strategy.launch(config).await?;

    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            debug!(?event, "browser event");
        }
    });

    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            // The process is already running; reclaim it before failing.
            let mut browser = browser;
            if let Err(close_err) = browser.close().await {
                warn!(error = %close_err, "failed to close browser after page creation failure");
            }
            handler_task.abort();
            return Err(BrowserError::LaunchFailed(format!(
                "failed to open page: {e}"
            )));
        },
    };

    info!(strategy = strategy.name(), "browser session ready");

    Ok(BrowserSession {
        browser,
        page,
        handler_task,
    })
}

/// Try each candidate binary in order, returning the first that launches.
async fn try_candidates(
    strategy: &str,
    candidates: &[PathBuf],
    args: &[String],
    config: &BrowserConfig,
) -> Result<(Browser, Handler), BrowserError> {
    let mut last_error = None;

    for binary in candidates {
        match launch_binary(binary, args, config).await {
            Ok(pair) => {
                info!(strategy, binary = %binary.display(), "browser launched");
                return Ok(pair);
            },
            Err(e) => {
                debug!(
                    strategy,
                    binary = %binary.display(),
                    error = %e,
                    "launch attempt failed, trying next candidate"
                );
                last_error = Some(e);
            },
        }
    }

    Err(match last_error {
        Some(e) => BrowserError::LaunchFailed(format!(
            "all {} candidate binaries failed, last error: {e}",
            candidates.len()
        )),
        None => BrowserError::LaunchFailed(detect::install_instructions()),
    })
}

async fn launch_binary(
    binary: &Path,
    args: &[String],
    config: &BrowserConfig,
) -> Result<(Browser, Handler), BrowserError> {
    let mut builder = CdpBrowserConfig::builder();

    // chromiumoxide runs headless by default; with_head() shows the window.
    if !config.headless {
        builder = builder.with_head();
    }

    builder = builder
        .chrome_executable(binary)
        .viewport(Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: true,
            has_touch: false,
        })
        .request_timeout(Duration::from_millis(config.navigation_timeout_ms));

    for arg in args {
        builder = builder.arg(arg);
    }
    for arg in &config.extra_args {
        builder = builder.arg(arg);
    }

    let cdp_config = builder
        .build()
        .map_err(|e| BrowserError::LaunchFailed(format!("failed to build browser config: {e}")))?;

    Browser::launch(cdp_config)
        .await
        .map_err(|e| BrowserError::LaunchFailed(e.to_string()))
}
