//! Application settings, read from `config/telexpenses.toml` (or the file
//! given with `--config`) and `TELEXPENSES__*` environment variables.

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/telexpenses.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    Memory,
    Sqlite(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Telegram {
    pub token: String,
    #[serde(default)]
    pub allowed_users: Vec<u64>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "Europe/Athens".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub database: Database,
    pub telegram: Telegram,
}

#[derive(Debug, Parser)]
#[command(name = "telexpenses", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "TELEXPENSES_CONFIG")]
    config: Option<String>,
    /// Override the log level.
    #[arg(long)]
    level: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        let args = Args::parse();
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut settings = Self::from_sources(
            config::File::with_name(config_path).required(false),
            config::Environment::with_prefix("TELEXPENSES")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("telegram.allowed_users")
                .try_parsing(true),
        )?;

        if let Some(level) = args.level {
            settings.app.level = level;
        }
        Ok(settings)
    }

    fn from_sources<F, E>(file: F, env: E) -> Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
        E: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use config::{File, FileFormat};

    use super::*;

    fn parse(toml: &str) -> Settings {
        Settings::from_sources(
            File::from_str(toml, FileFormat::Toml),
            config::Environment::with_prefix("TELEXPENSES_TEST_UNSET").separator("__"),
        )
        .unwrap()
    }

    #[test]
    fn defaults() {
        let settings = parse(
            r#"
            [telegram]
            token = "123:abc"
            "#,
        );
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.database, Database::Memory);
        assert!(settings.telegram.allowed_users.is_empty());
        assert_eq!(settings.telegram.timezone, "Europe/Athens");
    }

    #[test]
    fn full_file() {
        let settings = parse(
            r#"
            [app]
            level = "debug"

            [database]
            sqlite = "expenses.db"

            [telegram]
            token = "123:abc"
            allowed_users = [1, 2]
            timezone = "Europe/Rome"
            "#,
        );
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.database, Database::Sqlite("expenses.db".to_string()));
        assert_eq!(settings.telegram.allowed_users, vec![1, 2]);
        assert_eq!(settings.telegram.timezone, "Europe/Rome");
    }

    #[test]
    fn missing_token_is_an_error() {
        let result = Settings::from_sources(
            File::from_str("[app]\nlevel = \"info\"", FileFormat::Toml),
            config::Environment::with_prefix("TELEXPENSES_TEST_UNSET").separator("__"),
        );
        assert!(result.is_err());
    }
}
