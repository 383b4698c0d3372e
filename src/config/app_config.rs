use serde::Deserialize;

const DEFAULT_API_URL: &str = "https://api.getport.io/v1";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Client-credentials pair for the Port token endpoint.
///
/// No validation is applied; empty credentials simply fail at the remote
/// service when the first authenticated call is made.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from optional files plus the environment.
    ///
    /// `PORT__AUTH__CLIENT_ID`-style variables override file values; the
    /// flat `PORT_CLIENT_ID` / `PORT_CLIENT_SECRET` names used by earlier
    /// deployments are honored as a final fallback.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("PORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;

        if app_config.auth.client_id.is_empty() {
            if let Ok(client_id) = std::env::var("PORT_CLIENT_ID") {
                app_config.auth.client_id = client_id;
            }
        }

        if app_config.auth.client_secret.is_empty() {
            if let Ok(client_secret) = std::env::var("PORT_CLIENT_SECRET") {
                app_config.auth.client_secret = client_secret;
            }
        }

        Ok(app_config)
    }
}
