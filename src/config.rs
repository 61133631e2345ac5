use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub appwrite: AppwriteSettings,
    #[serde(default)]
    pub collection: CollectionSettings,
    #[serde(default)]
    pub geocode: GeocodeSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    #[serde(default = "default_appwrite_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub database_id: String,
}

impl Default for AppwriteSettings {
    fn default() -> Self {
        Self {
            endpoint: default_appwrite_endpoint(),
            api_key: String::new(),
            project_id: String::new(),
            database_id: String::new(),
        }
    }
}

fn default_appwrite_endpoint() -> String {
    "https://cloud.appwrite.io/v1".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_providers_collection")]
    pub providers: String,
    #[serde(default = "default_offerings_collection")]
    pub offerings: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            providers: default_providers_collection(),
            offerings: default_offerings_collection(),
        }
    }
}

fn default_providers_collection() -> String {
    "providers".to_string()
}

fn default_offerings_collection() -> String {
    "offerings".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeSettings {
    #[serde(default = "default_geocode_base_url")]
    pub base_url: String,
    #[serde(default = "default_geocode_country")]
    pub country: String,
    #[serde(default = "default_geocode_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeocodeSettings {
    fn default() -> Self {
        Self {
            base_url: default_geocode_base_url(),
            country: default_geocode_country(),
            timeout_secs: default_geocode_timeout(),
        }
    }
}

fn default_geocode_base_url() -> String {
    "https://api.zippopotam.us".to_string()
}

fn default_geocode_country() -> String {
    "in".to_string()
}

fn default_geocode_timeout() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u16,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            fetch_limit: default_fetch_limit(),
        }
    }
}

fn default_fetch_limit() -> u16 {
    500
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with NEARCART_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with NEARCART_)
            // e.g., NEARCART_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("NEARCART")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Substitute environment variables in string values
        // e.g., ${VAR_NAME} gets replaced with the value of VAR_NAME
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("NEARCART")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute environment variables in config values
///
/// Deployments usually set the Appwrite credentials as single-underscore
/// variables, which the prefixed source above does not pick up.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let appwrite_endpoint = env::var("NEARCART_APPWRITE__ENDPOINT").ok();
    let appwrite_api_key = env::var("NEARCART_APPWRITE__API_KEY").ok();
    let appwrite_project_id = env::var("NEARCART_APPWRITE__PROJECT_ID").ok();
    let appwrite_database_id = env::var("NEARCART_APPWRITE__DATABASE_ID").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = appwrite_endpoint {
        builder = builder.set_override("appwrite.endpoint", endpoint)?;
    }
    if let Some(api_key) = appwrite_api_key {
        builder = builder.set_override("appwrite.api_key", api_key)?;
    }
    if let Some(project_id) = appwrite_project_id {
        builder = builder.set_override("appwrite.project_id", project_id)?;
    }
    if let Some(database_id) = appwrite_database_id {
        builder = builder.set_override("appwrite.database_id", database_id)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_fully_defaulted() {
        let settings: Settings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.collection.providers, "providers");
        assert_eq!(settings.collection.offerings, "offerings");
        assert_eq!(settings.geocode.country, "in");
        assert_eq!(settings.catalog.fetch_limit, 500);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }
}
