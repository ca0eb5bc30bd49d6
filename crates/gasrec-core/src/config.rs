use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Every variable has a default, so an empty environment yields a working
/// development config pointed at a local backend.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let parse_u8 = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u8>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let backend_url =
        parse_backend_url(&or_default("GASREC_BACKEND_URL", "http://localhost:8080"))?;
    let env = parse_environment(&or_default("GASREC_ENV", "development"))?;
    let log_level = or_default("GASREC_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("GASREC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GASREC_USER_AGENT", "gasrec/0.1 (fuel-planner)");

    let geolocation_timeout_secs = parse_u64("GASREC_GEOLOCATION_TIMEOUT_SECS", "10")?;
    let geolocation_max_age_secs = parse_u64("GASREC_GEOLOCATION_MAX_AGE_SECS", "300")?;

    let max_map_zoom = parse_u8("GASREC_MAX_MAP_ZOOM", "15")?;
    if max_map_zoom > 21 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GASREC_MAX_MAP_ZOOM".to_string(),
            reason: format!("zoom {max_map_zoom} is above the map limit of 21"),
        });
    }

    let default_fuel_grade = or_default("GASREC_DEFAULT_FUEL_GRADE", "87");
    if default_fuel_grade.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "GASREC_DEFAULT_FUEL_GRADE".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(AppConfig {
        backend_url,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        geolocation_timeout_secs,
        geolocation_max_age_secs,
        max_map_zoom,
        default_fuel_grade,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GASREC_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidEnvVar {
            var: "GASREC_BACKEND_URL".to_string(),
            reason: format!("'{raw}' is not an http(s) URL"),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
