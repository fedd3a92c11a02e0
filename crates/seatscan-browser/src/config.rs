use std::path::PathBuf;
use std::time::Duration;

use seatscan_core::AppConfig;

/// Viewport matching the production deployment; listing layouts reflow
/// below desktop widths and change the selectors that match.
const WINDOW: (u32, u32) = (1280, 720);

/// How a browser process is acquired for one scrape.
#[derive(Debug, Clone)]
pub struct BrowserLaunchConfig {
    pub headless: bool,
    /// Explicit executable; discovered from well-known paths and `PATH`
    /// when absent.
    pub chrome_path: Option<PathBuf>,
    /// DevTools endpoint of an already-running browser. When set, no local
    /// process is launched.
    pub remote_url: Option<String>,
    /// Inject the stealth evasion profile into every new page.
    pub stealth: bool,
    pub window: (u32, u32),
    pub launch_timeout: Duration,
}

impl Default for BrowserLaunchConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            remote_url: None,
            stealth: false,
            window: WINDOW,
            launch_timeout: Duration::from_secs(60),
        }
    }
}

impl BrowserLaunchConfig {
    /// Builds a launch config from the application config, with the stealth
    /// profile decided per vendor adapter.
    #[must_use]
    pub fn from_app_config(config: &AppConfig, stealth: bool) -> Self {
        Self {
            headless: config.headless,
            chrome_path: config.chrome_path.clone(),
            remote_url: config.remote_browser_url.clone(),
            stealth,
            window: WINDOW,
            launch_timeout: Duration::from_secs(config.nav_timeout_secs),
        }
    }
}
