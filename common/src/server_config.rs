use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct DBConfig {
    pub dbtype: String, // POSTGRESQL
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: Option<DBConfig>,
    pub server: Option<ServerConfig>,
    pub auth: Option<AuthConfig>,
}

static APP_ENV: &str = "APP_ENV";
static APP_PREFIX: &str = "HOSPITAL";

/// Loads `application.{APP_ENV}.json` (default env: dev) and overlays
/// `HOSPITAL_`-prefixed environment variables on top of it.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenv().ok();

    let env = env::var(APP_ENV).unwrap_or_else(|_| "dev".into());
    let config_path = format!("application.{}.json", env);

    let settings = Config::builder()
        .add_source(File::with_name(&config_path).required(true))
        .add_source(Environment::with_prefix(APP_PREFIX).prefix_separator("_"))
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    Ok(app_config)
}
