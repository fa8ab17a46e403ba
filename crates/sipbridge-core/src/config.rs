use sipbridge_sipgate::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_REQUEST_TIMEOUT_SECS: &str = "30";
const DEFAULT_TEAM_CONTACTS_URL: &str = "https://app.sipgate.com/team/contacts";

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
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

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

    let env = parse_environment(&or_default("SIPBRIDGE_ENV", "development"))?;

    let bind_addr = or_default("SIPBRIDGE_BIND_ADDR", "0.0.0.0:8080")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SIPBRIDGE_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("SIPBRIDGE_LOG_LEVEL", "info");

    let sipgate_api_base_url = or_default("SIPGATE_API_BASE_URL", DEFAULT_BASE_URL);
    if !(sipgate_api_base_url.starts_with("http://")
        || sipgate_api_base_url.starts_with("https://"))
    {
        return Err(invalid(
            "SIPGATE_API_BASE_URL",
            format!("expected an http(s) URL, got '{sipgate_api_base_url}'"),
        ));
    }

    let sipgate_request_timeout_secs =
        parse_u64("SIPGATE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    let sipgate_page_size = parse_u32("SIPGATE_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())?;
    if sipgate_page_size == 0 {
        return Err(invalid("SIPGATE_PAGE_SIZE", "must be at least 1".to_string()));
    }

    let team_contacts_url = or_default("SIPGATE_TEAM_CONTACTS_URL", DEFAULT_TEAM_CONTACTS_URL);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        sipgate_api_base_url,
        sipgate_request_timeout_secs,
        sipgate_page_size,
        team_contacts_url,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SIPBRIDGE_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}
