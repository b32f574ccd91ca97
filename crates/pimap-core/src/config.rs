use crate::app_config::AppConfig;
use crate::types::FindMePreference;
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be a positive finite number, got {value}"),
            })
        }
    };

    let backend_base_url = require("PIMAP_BACKEND_BASE_URL")?;

    let ip_lookup_url = or_default("PIMAP_IP_LOOKUP_URL", "http://ip-api.com/json");
    let geocode_base_url = or_default(
        "PIMAP_GEOCODE_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );
    let log_level = or_default("PIMAP_LOG_LEVEL", "info");
    let user_agent = or_default("PIMAP_USER_AGENT", "pimap/0.1 (seller-discovery map)");

    let request_timeout_secs = parse_u64("PIMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("PIMAP_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("PIMAP_RETRY_BACKOFF_BASE_SECS", "1")?;
    let default_radius_km = parse_f64("PIMAP_DEFAULT_RADIUS_KM", "10")?;
    let gps_timeout_secs = parse_u64("PIMAP_GPS_TIMEOUT_SECS", "5")?;
    let banner_ttl_ms = parse_u64("PIMAP_BANNER_TTL_MS", "3000")?;

    let find_me = parse_find_me(&or_default("PIMAP_FIND_ME", "auto"))?;

    Ok(AppConfig {
        backend_base_url,
        ip_lookup_url,
        geocode_base_url,
        log_level,
        user_agent,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_secs,
        default_radius_km,
        gps_timeout_secs,
        banner_ttl_ms,
        find_me,
    })
}

fn parse_find_me(raw: &str) -> Result<FindMePreference, ConfigError> {
    raw.parse::<FindMePreference>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "PIMAP_FIND_ME".to_string(),
            reason,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
