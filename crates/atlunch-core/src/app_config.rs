use std::path::PathBuf;

use crate::geo::Coordinate;
use crate::ConfigError;

pub const PLACES_API_KEY_VAR: &str = "ATLUNCH_PLACES_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub data_dir: PathBuf,
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    pub place_category: String,
    pub search_radius_meters: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub mobile_breakpoint_px: u32,
    pub share_origin: String,
    pub default_center: Coordinate,
}

impl AppConfig {
    /// The places-service credential. Search cannot run without it, so callers
    /// that need search should call this up front and bail on error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when the key was not configured.
    pub fn require_places_api_key(&self) -> Result<&str, ConfigError> {
        self.places_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(PLACES_API_KEY_VAR.to_string()))
    }

    #[must_use]
    pub fn is_mobile_viewport(&self, width_px: u32) -> bool {
        width_px < self.mobile_breakpoint_px
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field("place_category", &self.place_category)
            .field("search_radius_meters", &self.search_radius_meters)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("mobile_breakpoint_px", &self.mobile_breakpoint_px)
            .field("share_origin", &self.share_origin)
            .field("default_center", &self.default_center)
            .finish()
    }
}
