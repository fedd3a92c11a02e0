use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let bind_addr = {
        let raw = or_default("SEATSCAN_BIND_ADDR", "127.0.0.1:8080");
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "SEATSCAN_BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?
    };

    let headless = {
        let raw = or_default("SEATSCAN_HEADLESS", "true");
        match raw.as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidEnvVar {
                    var: "SEATSCAN_HEADLESS".to_string(),
                    reason: format!("expected true/false, got \"{other}\""),
                })
            }
        }
    };

    let nav_timeout_secs = {
        let raw = or_default("SEATSCAN_NAV_TIMEOUT_SECS", "60");
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: "SEATSCAN_NAV_TIMEOUT_SECS".to_string(),
            reason: e.to_string(),
        })?
    };

    Ok(AppConfig {
        bind_addr,
        log_level: or_default("SEATSCAN_LOG_LEVEL", "info"),
        headless,
        chrome_path: optional("SEATSCAN_CHROME_PATH").map(PathBuf::from),
        remote_browser_url: optional("SEATSCAN_REMOTE_BROWSER_URL"),
        nav_timeout_secs,
        screenshot_dir: PathBuf::from(or_default("SEATSCAN_SCREENSHOT_DIR", "/tmp")),
        artifact_bucket: optional("SEATSCAN_ARTIFACT_BUCKET"),
        artifact_region: optional("SEATSCAN_ARTIFACT_REGION"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
