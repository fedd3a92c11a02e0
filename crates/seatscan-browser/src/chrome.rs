//! Browser process lifecycle: discovery, launch, remote attach, close.

use std::path::PathBuf;

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::BrowserLaunchConfig;
use crate::page::ChromePage;

/// Common Chrome executable paths to check before falling back to `PATH`.
const CHROME_PATHS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/opt/google/chrome/google-chrome",
];

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Chrome/Chromium executable not found; install it or set SEATSCAN_CHROME_PATH")]
    ChromeNotFound,

    #[error("invalid browser configuration: {0}")]
    Config(String),

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("failed to reach remote browser: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("remote browser handshake failed: {0}")]
    RemoteHandshake(String),
}

/// A launched (or attached) browser with its CDP handler pump.
pub struct HeadlessBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl HeadlessBrowser {
    /// Launches a local Chrome, or attaches to the configured remote
    /// DevTools endpoint when one is set.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] when no executable can be found, the launch
    /// configuration is rejected, or the process/endpoint cannot be reached.
    pub async fn launch(config: &BrowserLaunchConfig) -> Result<Self, LaunchError> {
        if let Some(remote_url) = &config.remote_url {
            return Self::connect_remote(remote_url).await;
        }

        let chrome_path = match &config.chrome_path {
            Some(path) => path.clone(),
            None => find_chrome()?,
        };
        tracing::info!(
            path = %chrome_path.display(),
            headless = config.headless,
            stealth = config.stealth,
            "launching browser"
        );

        let (width, height) = config.window;
        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .window_size(width, height)
            .arg(format!("--window-size={width},{height}"))
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");
        if config.stealth {
            builder = builder
                .arg("--disable-blink-features=AutomationControlled")
                .arg("--disable-infobars");
        }
        if !config.headless {
            // with_head means NOT headless, confusingly.
            builder = builder.with_head();
        }

        let browser_config = builder.build().map_err(LaunchError::Config)?;
        let (browser, mut handler) =
            tokio::time::timeout(config.launch_timeout, Browser::launch(browser_config))
                .await
                .map_err(|_| {
                    LaunchError::Launch(format!(
                        "launch timed out after {}s",
                        config.launch_timeout.as_secs()
                    ))
                })?
                .map_err(|e| LaunchError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Attaches to an already-running browser via its DevTools endpoint.
    async fn connect_remote(url: &str) -> Result<Self, LaunchError> {
        tracing::info!(url, "connecting to remote browser");

        // The websocket URL must come from /json/version; the configured
        // endpoint is only the HTTP face of the debugger.
        let http_url = url.replace("ws://", "http://").replace("wss://", "https://");
        let version_url = format!("{}/json/version", http_url.trim_end_matches('/'));

        let response: serde_json::Value = reqwest::Client::new()
            .get(&version_url)
            .send()
            .await?
            .json()
            .await?;
        let ws_url = response
            .get("webSocketDebuggerUrl")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                LaunchError::RemoteHandshake("no webSocketDebuggerUrl in response".to_owned())
            })?;

        let (browser, mut handler) = Browser::connect(ws_url)
            .await
            .map_err(|e| LaunchError::RemoteHandshake(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Opens a fresh page, applying the stealth profile when requested.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Launch`] when the target cannot be created.
    pub async fn new_page(&self, stealth: bool) -> Result<ChromePage, LaunchError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| LaunchError::Launch(e.to_string()))?;
        Ok(ChromePage::new(page, stealth))
    }

    /// Releases the browser. Best-effort: close failures are logged, never
    /// escalated — teardown must not mask whatever the session produced.
    pub async fn close(mut self) {
        if let Err(error) = self.browser.close().await {
            tracing::warn!(error = %error, "browser close failed");
        }
        self.handler_task.abort();
    }
}

/// Finds a Chrome executable on well-known paths, then on `PATH`.
fn find_chrome() -> Result<PathBuf, LaunchError> {
    for path in CHROME_PATHS {
        let candidate = std::path::Path::new(path);
        if candidate.exists() {
            return Ok(candidate.to_path_buf());
        }
    }

    for command in &["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"] {
        if let Ok(output) = std::process::Command::new("which").arg(command).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Ok(PathBuf::from(path));
                }
            }
        }
    }

    Err(LaunchError::ChromeNotFound)
}
