use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use judge::JudgeConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Token lifetime. Default: 7.
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
    /// Bootstrap admin account created on startup when both are set.
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

fn default_token_ttl_days() -> i64 {
    7
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReviewConfig {
    /// Hosts a buildathon link may point to: an exact match or a subdomain,
    /// over http(s) only. Default: ["github.com"].
    #[serde(default = "default_repository_hosts")]
    pub repository_hosts: Vec<String>,
}

fn default_repository_hosts() -> Vec<String> {
    vec!["github.com".into()]
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            repository_hosts: default_repository_hosts(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub judge: JudgeConfig,
    #[serde(default)]
    pub review: ReviewConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("OASIS_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://oasis.db?mode=rwc")?
            // Load from config/config.toml
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., OASIS__AUTH__JWT_SECRET)
            .add_source(
                Environment::with_prefix("OASIS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .with_list_parse_key("review.repository_hosts")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
