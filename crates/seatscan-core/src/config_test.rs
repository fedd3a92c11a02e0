use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn empty_env_yields_defaults() {
    let map = HashMap::new();
    let config = build_app_config(lookup_from_map(&map)).expect("defaults should parse");

    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(config.log_level, "info");
    assert!(config.headless);
    assert!(config.chrome_path.is_none());
    assert!(config.remote_browser_url.is_none());
    assert_eq!(config.nav_timeout_secs, 60);
    assert_eq!(config.screenshot_dir.to_str(), Some("/tmp"));
    assert!(config.artifact_bucket.is_none());
    assert!(config.artifact_region.is_none());
}

#[test]
fn overrides_are_honoured() {
    let mut map = HashMap::new();
    map.insert("SEATSCAN_BIND_ADDR", "0.0.0.0:9000");
    map.insert("SEATSCAN_LOG_LEVEL", "debug");
    map.insert("SEATSCAN_HEADLESS", "false");
    map.insert("SEATSCAN_CHROME_PATH", "/usr/bin/chromium");
    map.insert("SEATSCAN_NAV_TIMEOUT_SECS", "30");
    map.insert("SEATSCAN_SCREENSHOT_DIR", "/var/tmp/shots");
    map.insert("SEATSCAN_ARTIFACT_BUCKET", "seatscan-debug");
    map.insert("SEATSCAN_ARTIFACT_REGION", "us-east-1");

    let config = build_app_config(lookup_from_map(&map)).expect("valid overrides");

    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:9000");
    assert_eq!(config.log_level, "debug");
    assert!(!config.headless);
    assert_eq!(config.chrome_path.as_deref().and_then(|p| p.to_str()), Some("/usr/bin/chromium"));
    assert_eq!(config.nav_timeout_secs, 30);
    assert_eq!(config.screenshot_dir.to_str(), Some("/var/tmp/shots"));
    assert_eq!(config.artifact_bucket.as_deref(), Some("seatscan-debug"));
    assert_eq!(config.artifact_region.as_deref(), Some("us-east-1"));
}

#[test]
fn invalid_bind_addr_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SEATSCAN_BIND_ADDR", "not-an-addr");

    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SEATSCAN_BIND_ADDR"),
        "expected InvalidEnvVar(SEATSCAN_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn invalid_headless_flag_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SEATSCAN_HEADLESS", "maybe");

    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SEATSCAN_HEADLESS"),
        "expected InvalidEnvVar(SEATSCAN_HEADLESS), got: {result:?}"
    );
}

#[test]
fn invalid_nav_timeout_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SEATSCAN_NAV_TIMEOUT_SECS", "soon");

    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SEATSCAN_NAV_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SEATSCAN_NAV_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn blank_optional_vars_are_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("SEATSCAN_ARTIFACT_BUCKET", "");
    map.insert("SEATSCAN_REMOTE_BROWSER_URL", "");

    let config = build_app_config(lookup_from_map(&map)).expect("blank optionals are fine");
    assert!(config.artifact_bucket.is_none());
    assert!(config.remote_browser_url.is_none());
}
