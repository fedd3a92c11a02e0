use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration shared by the server and CLI binaries.
///
/// Loaded from environment variables by [`crate::load_app_config`]. Browser
/// and artifact settings live here (rather than in the crates that consume
/// them) so one `.env` file configures every binary the same way.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Run Chrome without a visible window. Disable for local debugging.
    pub headless: bool,
    /// Explicit Chrome/Chromium executable; discovered on PATH when absent.
    pub chrome_path: Option<PathBuf>,
    /// DevTools endpoint of an already-running browser to attach to instead
    /// of launching one (e.g. `ws://127.0.0.1:9222`).
    pub remote_browser_url: Option<String>,
    pub nav_timeout_secs: u64,
    /// Directory for failure screenshots before they are shipped to the
    /// artifact sink.
    pub screenshot_dir: PathBuf,
    /// S3 bucket for failure screenshots. The sink is disabled when unset.
    pub artifact_bucket: Option<String>,
    pub artifact_region: Option<String>,
}
