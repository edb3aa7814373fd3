//! src/configuration.rs

use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;

/// Environment variable that overrides the configured connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    // Upstream channel every log record is emitted under
    pub log_channel: String,
    pub log_level: String,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct DatabaseSettings {
    // The URL is marked as secret because it may embed a password.
    pub url: Secret<String>,
    // Log every statement sent to the database; always disabled at runtime
    #[serde(default)]
    pub track_modifications: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub acquire_timeout_seconds: u64,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options: PgConnectOptions = self.url.expose_secret().parse()?;
        let options = if self.track_modifications {
            options.log_statements(log::LevelFilter::Debug)
        } else {
            options.disable_statement_logging()
        };
        Ok(options)
    }

    pub fn acquire_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.acquire_timeout_seconds)
    }
}

impl Settings {
    /// Applies the overrides that always win over the configuration files:
    /// a non-empty `DATABASE_URL` replaces the connection string and
    /// statement tracking is switched off.
    pub fn with_runtime_overrides(mut self, database_url: Option<String>) -> Self {
        if let Some(url) = database_url.filter(|url| !url.is_empty()) {
            self.database.url = Secret::new(url);
        }
        self.database.track_modifications = false;
        self
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!(
            "Failed to determine the current directory: {}",
            e
        ))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base")).required(true))
        .add_source(
            config::File::from(configuration_directory.join(environment.as_str()))
                .required(true),
        )
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_APPLICATION__PORT=5001` would set `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings: Settings = settings.try_deserialize()?;
    Ok(settings.with_runtime_overrides(std::env::var(DATABASE_URL_VAR).ok()))
}

/// Debug line announcing the connection string taken from the environment.
/// Any password embedded in the URL is masked.
pub fn database_url_banner(database_url: Option<&str>) -> String {
    let shown = match database_url {
        None => "<unset>".to_string(),
        Some(raw) => redact_password(raw),
    };
    format!("{} = {}", DATABASE_URL_VAR, shown)
}

fn redact_password(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) if parsed.password().is_some() => {
            // Only fails for cannot-be-a-base URLs, which carry no password
            let _ = parsed.set_password(Some("***"));
            parsed.to_string()
        }
        Ok(_) => raw.to_string(),
        Err(_) => "<unparseable>".to_string(),
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(a: String) -> Result<Self, Self::Error> {
        match a.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not supported environment. Use either 'Local' or 'Production'.",
                other
            )),
        }
    }
}
