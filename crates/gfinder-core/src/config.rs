use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let maps_api_key = require("GOOGLE_MAPS_API_KEY")?;

    let bind_addr = parse_addr("GFINDER_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("GFINDER_LOG_LEVEL", "info");

    let maps_base_url = or_default("GFINDER_MAPS_BASE_URL", "https://maps.googleapis.com/");
    let maps_request_timeout_secs = parse_u64("GFINDER_MAPS_REQUEST_TIMEOUT_SECS", "10")?;
    let maps_user_agent = or_default("GFINDER_MAPS_USER_AGENT", "g-finder/0.1 (lead-capture)");
    let maps_language = lookup("GFINDER_MAPS_LANGUAGE")
        .ok()
        .filter(|v| !v.trim().is_empty());

    let detail_timeout_secs = parse_u64("GFINDER_DETAIL_TIMEOUT_SECS", "10")?;
    let max_concurrent_details = parse_usize("GFINDER_MAX_CONCURRENT_DETAILS", "20")?;

    let zero_checks = [
        ("GFINDER_MAPS_REQUEST_TIMEOUT_SECS", maps_request_timeout_secs == 0),
        ("GFINDER_DETAIL_TIMEOUT_SECS", detail_timeout_secs == 0),
        ("GFINDER_MAX_CONCURRENT_DETAILS", max_concurrent_details == 0),
    ];
    if let Some((var, _)) = zero_checks.into_iter().find(|(_, is_zero)| *is_zero) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        bind_addr,
        log_level,
        maps_api_key,
        maps_base_url,
        maps_request_timeout_secs,
        maps_user_agent,
        maps_language,
        detail_timeout_secs,
        max_concurrent_details,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
