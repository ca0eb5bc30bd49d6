use std::time::Duration;

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

/// Runtime settings for the client, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub geolocation_timeout_secs: u64,
    pub geolocation_max_age_secs: u64,
    pub max_map_zoom: u8,
    pub default_fuel_grade: String,
}

impl AppConfig {
    #[must_use]
    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }

    #[must_use]
    pub fn geolocation_max_age(&self) -> Duration {
        Duration::from_secs(self.geolocation_max_age_secs)
    }
}
