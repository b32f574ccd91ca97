use crate::types::FindMePreference;

/// Runtime configuration for the map client, sourced from environment
/// variables (see [`crate::config::load_app_config`]).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the external Map of Pi backend.
    pub backend_base_url: String,
    /// Keyless IP-geolocation endpoint used by the auto tier.
    pub ip_lookup_url: String,
    /// Place-name geocoding service base URL.
    pub geocode_base_url: String,
    pub log_level: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Radius of the initial seller fetch after the origin resolves.
    pub default_radius_km: f64,
    /// How long a device-GPS attempt may run before failing over.
    pub gps_timeout_secs: u64,
    /// Lifetime of transient notice banners before auto-dismissal.
    pub banner_ttl_ms: u64,
    pub find_me: FindMePreference,
}
