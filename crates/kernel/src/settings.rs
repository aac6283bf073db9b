use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "RAGSEED_ENV";
const CONFIG_DIR_ENV: &str = "RAGSEED_CONFIG_DIR";
const ENV_PREFIX: &str = "RAGSEED";

/// Deployment environment the bootstrap is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    fn parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub seed: SeedSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            // Default to the `config` directory under the working directory.
            Err(_) => std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config"),
        };

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let cfg = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings = Self::from_config(cfg)?;
        settings.environment = Environment::parse(&environment)?;

        Ok(settings)
    }

    fn from_config(cfg: config::Config) -> anyhow::Result<Self> {
        cfg.try_deserialize()
            .with_context(|| "failed to deserialize configuration")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "DatabaseSettings::default_uri")]
    pub uri: String,
    #[serde(default = "DatabaseSettings::default_name")]
    pub name: String,
    #[serde(default = "DatabaseSettings::default_collection")]
    pub collection: String,
    #[serde(default = "DatabaseSettings::default_server_selection_timeout_ms")]
    pub server_selection_timeout_ms: u64,
    #[serde(default)]
    pub app_name: Option<String>,
}

impl DatabaseSettings {
    fn default_uri() -> String {
        "mongodb://localhost:27017".to_string()
    }

    fn default_name() -> String {
        "nuskin_rag".to_string()
    }

    fn default_collection() -> String {
        "rag_content".to_string()
    }

    fn default_server_selection_timeout_ms() -> u64 {
        5000
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: Self::default_uri(),
            name: Self::default_name(),
            collection: Self::default_collection(),
            server_selection_timeout_ms: Self::default_server_selection_timeout_ms(),
            app_name: None,
        }
    }
}

/// How the seed document is written.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// Plain insert; every run adds another document.
    #[default]
    Insert,
    /// Upsert keyed on `content_type` and `metadata.test`.
    Upsert,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedSettings {
    #[serde(default)]
    pub mode: SeedMode,
    #[serde(default = "SeedSettings::default_content")]
    pub content: String,
    #[serde(default = "SeedSettings::default_content_type")]
    pub content_type: String,
}

impl SeedSettings {
    fn default_content() -> String {
        "Test content".to_string()
    }

    fn default_content_type() -> String {
        "test".to_string()
    }
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            mode: SeedMode::default(),
            content: Self::default_content(),
            content_type: Self::default_content_type(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "TelemetrySettings::default_log_level")]
    pub log_level: String,
}

impl TelemetrySettings {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_level: Self::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> Settings {
        let cfg = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap();
        Settings::from_config(cfg).unwrap()
    }

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn defaults_target_rag_content_store() {
        let settings = Settings::default();
        assert_eq!(settings.database.uri, "mongodb://localhost:27017");
        assert_eq!(settings.database.name, "nuskin_rag");
        assert_eq!(settings.database.collection, "rag_content");
        assert_eq!(settings.database.server_selection_timeout_ms, 5000);
    }

    #[test]
    fn default_seed_is_plain_insert_of_test_content() {
        let seed = SeedSettings::default();
        assert_eq!(seed.mode, SeedMode::Insert);
        assert_eq!(seed.content, "Test content");
        assert_eq!(seed.content_type, "test");
    }

    #[test]
    fn empty_source_matches_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.database.name, "nuskin_rag");
        assert_eq!(settings.seed.mode, SeedMode::Insert);
        assert_eq!(settings.telemetry.log_format, LogFormat::Pretty);
        assert_eq!(settings.telemetry.log_level, "info");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let settings = from_toml(
            r#"
            [database]
            uri = "mongodb://mongo:27017"

            [seed]
            mode = "upsert"

            [telemetry]
            log_format = "json"
            "#,
        );
        assert_eq!(settings.database.uri, "mongodb://mongo:27017");
        assert_eq!(settings.database.collection, "rag_content");
        assert_eq!(settings.seed.mode, SeedMode::Upsert);
        assert_eq!(settings.seed.content_type, "test");
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert_eq!(
            Environment::parse("production").unwrap(),
            Environment::Production
        );
        let err = Environment::parse("qa").unwrap_err();
        assert!(err.to_string().contains("unsupported environment 'qa'"));
    }
}
