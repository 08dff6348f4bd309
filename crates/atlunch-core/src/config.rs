use crate::app_config::{AppConfig, Environment, PLACES_API_KEY_VAR};
use crate::geo::Coordinate;
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
/// The places API key is read but not required here: location resolution and
/// persisted replay work without it. See [`AppConfig::require_places_api_key`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("ATLUNCH_ENV", "development"));
    let log_level = or_default("ATLUNCH_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("ATLUNCH_DATA_DIR", "./.atlunch"));

    let places_api_key = lookup(PLACES_API_KEY_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty());
    let places_base_url = or_default(
        "ATLUNCH_PLACES_BASE_URL",
        "https://maps.googleapis.com/maps/api/place/",
    );
    let place_category = or_default("ATLUNCH_PLACE_CATEGORY", "restaurant");
    let search_radius_meters = parse_u32("ATLUNCH_SEARCH_RADIUS_METERS", "500")?;
    if search_radius_meters == 0 {
        return Err(invalid(
            "ATLUNCH_SEARCH_RADIUS_METERS",
            "radius must be greater than zero".to_string(),
        ));
    }
    let request_timeout_secs = parse_u64("ATLUNCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ATLUNCH_USER_AGENT", "atlunch/0.1 (nearby-places)");
    let mobile_breakpoint_px = parse_u32("ATLUNCH_MOBILE_BREAKPOINT_PX", "1280")?;
    let share_origin = or_default("ATLUNCH_SHARE_ORIGIN", "http://localhost:8000");

    let default_lat = parse_f64("ATLUNCH_DEFAULT_LAT", "36.408108")?;
    let default_lng = parse_f64("ATLUNCH_DEFAULT_LNG", "-105.572679")?;
    let default_center = Coordinate::new(default_lat, default_lng)
        .map_err(|e| invalid("ATLUNCH_DEFAULT_LAT/ATLUNCH_DEFAULT_LNG", e.to_string()))?;

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        places_api_key,
        places_base_url,
        place_category,
        search_radius_meters,
        request_timeout_secs,
        user_agent,
        mobile_breakpoint_px,
        share_origin,
        default_center,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
