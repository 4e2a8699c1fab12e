use crate::app_config::{AppConfig, Environment};
use crate::contact::sanitize_number;
use crate::ConfigError;

/// Apps Script web app that publishes the product sheet.
pub const DEFAULT_API_URL: &str = "https://script.google.com/macros/s/AKfycby7Iwe8Y86-sVMy5PNGYhm1fcp4qgJ89VzUWrODes57i-wJCeqXswMn5KYAdRFZMhSPFA/exec";

pub const DEFAULT_WHATSAPP_NUMBER: &str = "5491100000000";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; defaults mirror the storefront's published
/// constants.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("BSI_ENV", "development"))?;
    let log_level = or_default("BSI_LOG_LEVEL", env.default_log_level());

    let api_url = or_default("BSI_API_URL", DEFAULT_API_URL);
    if !(api_url.starts_with("https://") || api_url.starts_with("http://")) {
        return Err(invalid("BSI_API_URL", format!("not an http(s) URL: {api_url}")));
    }

    let whatsapp_raw = or_default("BSI_WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER);
    let whatsapp_number =
        sanitize_number(&whatsapp_raw).map_err(|e| invalid("BSI_WHATSAPP_NUMBER", e.to_string()))?;

    let low_stock_threshold = parse_u32("BSI_LOW_STOCK_THRESHOLD", "5")?;
    let search_debounce_ms = parse_u64("BSI_SEARCH_DEBOUNCE_MS", "300")?;
    let related_limit = parse_usize("BSI_RELATED_LIMIT", "4")?;

    let image_concurrency = parse_usize("BSI_IMAGE_CONCURRENCY", "4")?;
    if image_concurrency == 0 {
        return Err(invalid("BSI_IMAGE_CONCURRENCY", "must be at least 1".to_string()));
    }

    let request_timeout_secs = parse_u64("BSI_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BSI_USER_AGENT", "bsi-catalog/0.1");
    let max_retries = parse_u32("BSI_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("BSI_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        env,
        log_level,
        api_url,
        whatsapp_number,
        low_stock_threshold,
        search_debounce_ms,
        related_limit,
        image_concurrency,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BSI_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
