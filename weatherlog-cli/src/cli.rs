use anyhow::{Context, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use std::{
    io,
    path::{Path, PathBuf},
};

use weatherlog_core::{Config, LogError, ProviderId, WeatherLogger};

use crate::{output, shell};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherlog", version, about = "Log the current weather for a city")]
pub struct Cli {
    /// Path to the config file (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Without a command, starts the interactive menu.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a provider.
    Configure {
        /// Provider short name, e.g. "openweather" or "weatherapi".
        provider: String,

        /// Make this provider the default even if another one is set.
        #[arg(long)]
        default: bool,
    },

    /// Log today's weather for a city.
    Log {
        /// City name, e.g. "London".
        city: String,
    },

    /// Print both logs.
    View,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        let mut config = Config::load_from(&config_path)?;

        match self.command {
            Some(Command::Configure { provider, default }) => {
                configure(&mut config, &provider, default, &config_path)
            }
            Some(Command::Log { city }) => {
                let logger = open_logger(&config)?;
                match logger.log(&city, today()).await {
                    Err(e) if !matches!(e, LogError::Duplicate { .. }) => Err(e.into()),
                    result => {
                        output::write_log_result(&result, &mut io::stdout().lock())?;
                        Ok(())
                    }
                }
            }
            Some(Command::View) => {
                let logger = open_logger(&config)?;
                output::write_listing(&logger.listing(), &mut io::stdout().lock())?;
                Ok(())
            }
            None => {
                let logger = open_logger(&config)?;
                shell::run(&logger, io::stdin().lock(), io::stdout().lock(), today).await?;
                Ok(())
            }
        }
    }
}

/// Build the logger and make sure both stores exist. Failure here is fatal;
/// a missing provider is not, it only fails individual log attempts.
fn open_logger(config: &Config) -> anyhow::Result<WeatherLogger> {
    let logger = WeatherLogger::from_config(config);
    logger.init().context("Failed to prepare weather log storage")?;
    Ok(logger)
}

fn configure(
    config: &mut Config,
    provider: &str,
    make_default: bool,
    path: &Path,
) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    let message = store_api_key(config, id, api_key, make_default);
    config.save_to(path)?;

    tracing::info!(provider = %id, path = %path.display(), "saved provider credentials");
    println!("{message} ({})", path.display());
    Ok(())
}

/// Record the key in `config`; returns the confirmation line for the user.
fn store_api_key(config: &mut Config, id: ProviderId, api_key: &str, make_default: bool) -> String {
    let verb = if config.is_provider_configured(id) { "Replaced" } else { "Saved" };

    config.upsert_provider_api_key(id, api_key.to_string());
    if make_default {
        config.set_default_provider(id);
    }

    format!("{verb} API key for {id}")
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weatherlog"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn log_takes_a_city_and_global_config() {
        let cli =
            Cli::try_parse_from(["weatherlog", "log", "New York", "--config", "/tmp/w.toml"]).unwrap();

        assert!(matches!(cli.command, Some(Command::Log { ref city }) if city == "New York"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/w.toml")));
    }

    #[test]
    fn configure_requires_provider() {
        assert!(Cli::try_parse_from(["weatherlog", "configure"]).is_err());

        let cli = Cli::try_parse_from(["weatherlog", "configure", "weatherapi", "--default"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Configure { ref provider, default: true }) if provider == "weatherapi"
        ));
    }

    fn unconfigured(dir: &Path) -> PathBuf {
        let config_path = dir.join("config.toml");
        let mut config = Config::default();
        config.storage.csv_path = dir.join("weather_logs.csv");
        config.storage.database_path = dir.join("weather_logs.db");
        config.save_to(&config_path).unwrap();
        config_path
    }

    #[tokio::test]
    async fn view_works_without_a_provider() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = unconfigured(dir.path());
        let csv = dir.path().join("weather_logs.csv");
        std::fs::write(&csv, "Date,City,Temperature,Condition\n2024-05-01,London,15.2,Clouds\n")
            .unwrap();

        let cli = Cli { config: Some(config_path), command: Some(Command::View) };
        cli.run().await.unwrap();

        assert!(dir.path().join("weather_logs.db").exists());
        let contents = std::fs::read_to_string(&csv).unwrap();
        assert!(contents.ends_with("2024-05-01,London,15.2,Clouds\n"));
    }

    #[tokio::test]
    async fn log_without_a_provider_reports_the_setup_hint() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = unconfigured(dir.path());

        let cli = Cli {
            config: Some(config_path),
            command: Some(Command::Log { city: "London".into() }),
        };
        let err = cli.run().await.unwrap_err();

        assert!(err.to_string().contains("weatherlog configure"));
    }

    #[test]
    fn storing_a_key_reports_saved_then_replaced() {
        let mut config = Config::default();

        let first = store_api_key(&mut config, ProviderId::OpenWeather, "ONE", false);
        let second = store_api_key(&mut config, ProviderId::OpenWeather, "TWO", false);
        store_api_key(&mut config, ProviderId::WeatherApi, "THREE", true);

        assert_eq!(first, "Saved API key for openweather");
        assert_eq!(second, "Replaced API key for openweather");
        assert_eq!(config.provider_api_key(ProviderId::OpenWeather), Some("TWO"));
        assert_eq!(config.default_provider_id().unwrap(), ProviderId::WeatherApi);
    }
}
