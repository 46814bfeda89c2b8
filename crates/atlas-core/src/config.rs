use crate::app_config::AppConfig;
use crate::pagination::DEFAULT_PAGE_SIZE;
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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    // An empty value counts as unset.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let sanity_project_id = require("PUBLIC_SANITY_PROJECT_ID")?;
    let sanity_dataset = require("PUBLIC_SANITY_DATASET")?;
    let sanity_api_version = require("PUBLIC_SANITY_API_VERSION")?;
    let sanity_token = require("SANITY_TOKEN")?;

    let sanity_use_cdn = parse_bool(&or_default("ATLAS_SANITY_USE_CDN", "true"))
        .ok_or_else(|| invalid("ATLAS_SANITY_USE_CDN", "expected true or false".to_string()))?;

    let bind_addr = or_default("ATLAS_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("ATLAS_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("ATLAS_LOG_LEVEL", "info");

    let page_size = parse_u32("ATLAS_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())?;
    if page_size == 0 {
        return Err(invalid("ATLAS_PAGE_SIZE", "must be at least 1".to_string()));
    }
    let request_timeout_secs = parse_u64("ATLAS_REQUEST_TIMEOUT_SECS", "30")?;

    let geocoder_base_url = or_default("ATLAS_GEOCODER_URL", "https://nominatim.openstreetmap.org");
    let geocoder_user_agent = or_default("ATLAS_GEOCODER_USER_AGENT", "SanityAssetLocationUpdater/1.0");
    let geocoder_delay_ms = parse_u64("ATLAS_GEOCODER_DELAY_MS", "1000")?;

    Ok(AppConfig {
        sanity_project_id,
        sanity_dataset,
        sanity_api_version,
        sanity_token,
        sanity_use_cdn,
        bind_addr,
        log_level,
        page_size,
        request_timeout_secs,
        geocoder_base_url,
        geocoder_user_agent,
        geocoder_delay_ms,
    })
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
