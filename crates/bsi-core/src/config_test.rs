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
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BSI_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.whatsapp_number, DEFAULT_WHATSAPP_NUMBER);
    assert_eq!(cfg.low_stock_threshold, 5);
    assert_eq!(cfg.search_debounce_ms, 300);
    assert_eq!(cfg.related_limit, 4);
    assert_eq!(cfg.image_concurrency, 4);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "bsi-catalog/0.1");
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("BSI_ENV", "production");
    map.insert("BSI_API_URL", "http://127.0.0.1:8080/exec");
    map.insert("BSI_WHATSAPP_NUMBER", "+54 9 11 5555-0000");
    map.insert("BSI_LOW_STOCK_THRESHOLD", "3");
    map.insert("BSI_SEARCH_DEBOUNCE_MS", "150");
    map.insert("BSI_IMAGE_CONCURRENCY", "8");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.api_url, "http://127.0.0.1:8080/exec");
    assert_eq!(cfg.whatsapp_number, "5491155550000");
    assert_eq!(cfg.low_stock_threshold, 3);
    assert_eq!(cfg.search_debounce_ms, 150);
    assert_eq!(cfg.image_concurrency, 8);
}

#[test]
fn build_app_config_rejects_non_http_api_url() {
    let mut map = HashMap::new();
    map.insert("BSI_API_URL", "ftp://example.com/exec");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BSI_API_URL"),
        "expected InvalidEnvVar(BSI_API_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_bad_whatsapp_number() {
    let mut map = HashMap::new();
    map.insert("BSI_WHATSAPP_NUMBER", "not-a-phone");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BSI_WHATSAPP_NUMBER"),
        "expected InvalidEnvVar(BSI_WHATSAPP_NUMBER), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_threshold() {
    let mut map = HashMap::new();
    map.insert("BSI_LOW_STOCK_THRESHOLD", "five");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BSI_LOW_STOCK_THRESHOLD"),
        "expected InvalidEnvVar(BSI_LOW_STOCK_THRESHOLD), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_image_concurrency() {
    let mut map = HashMap::new();
    map.insert("BSI_IMAGE_CONCURRENCY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BSI_IMAGE_CONCURRENCY"),
        "expected InvalidEnvVar(BSI_IMAGE_CONCURRENCY), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("BSI_REQUEST_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BSI_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BSI_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_contact_number() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("[redacted]"));
    assert!(!rendered.contains(DEFAULT_WHATSAPP_NUMBER));
}

#[test]
fn log_level_default_follows_environment() {
    let mut map = HashMap::new();
    map.insert("BSI_ENV", "test");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "warn");
    assert!(!cfg.env.colored_logs());

    map.insert("BSI_LOG_LEVEL", "bsi_sheets=trace");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "bsi_sheets=trace");

    let empty: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&empty)).unwrap();
    assert!(cfg.env.colored_logs());
}
