use std::path::PathBuf;

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

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        match or_default(var, default).as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got '{other}'"),
            }),
        }
    };

    let api_token = require("KURIR_API_TOKEN")?;
    let location_code = require("KURIR_LOCATION")?;

    let api_base_url = or_default("KURIR_API_BASE_URL", "https://api.mile.app/api/v3");
    let hubs_path = PathBuf::from(or_default("KURIR_HUBS_PATH", "./config/hubs.yaml"));
    let drivers_path = PathBuf::from(or_default("KURIR_DRIVERS_PATH", "./data/drivers.json"));
    let output_dir = PathBuf::from(or_default("KURIR_OUTPUT_DIR", "./reports"));
    let log_level = or_default("KURIR_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("KURIR_REQUEST_TIMEOUT_SECS", "30")?;
    let task_limit = parse_u32("KURIR_TASK_LIMIT", "500")?;
    let open_after_write = parse_bool("KURIR_OPEN_AFTER_WRITE", "true")?;

    Ok(AppConfig {
        api_base_url,
        api_token,
        location_code,
        hubs_path,
        drivers_path,
        output_dir,
        log_level,
        request_timeout_secs,
        task_limit,
        open_after_write,
    })
}
