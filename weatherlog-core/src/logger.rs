//! One "log the weather" operation across both stores.

use chrono::NaiveDate;

use crate::{
    config::Config,
    error::{LogError, ProviderError, StorageError},
    model::WeatherRecord,
    provider::{WeatherProvider, default_provider_from_config},
    store::{CsvLogStore, SqliteLogStore},
};

/// How a log attempt that got past the provider ended.
#[derive(Debug)]
pub enum LogOutcome {
    /// Written to both stores.
    Logged(WeatherRecord),

    /// Written to the CSV only; the database refused the row. The CSV row
    /// stays, so the two stores now disagree.
    DatabaseRejected { record: WeatherRecord, error: StorageError },
}

/// Contents of both stores, for display.
#[derive(Debug)]
pub struct Listing {
    pub csv: Result<Vec<WeatherRecord>, StorageError>,
    pub database: Result<Vec<WeatherRecord>, StorageError>,
}

/// Orchestrates logging and listing. Listing never touches the provider, so
/// a logger without one still serves the viewer.
#[derive(Debug)]
pub struct WeatherLogger {
    /// `Err` holds the reason no provider could be built, shown on each log attempt.
    provider: Result<Box<dyn WeatherProvider>, String>,
    csv: CsvLogStore,
    database: SqliteLogStore,
}

impl WeatherLogger {
    pub fn new(provider: Box<dyn WeatherProvider>, csv: CsvLogStore, database: SqliteLogStore) -> Self {
        Self { provider: Ok(provider), csv, database }
    }

    /// Wire up both stores and, if configured, the default provider.
    pub fn from_config(config: &Config) -> Self {
        let provider = default_provider_from_config(config).map_err(|e| {
            tracing::warn!(error = %e, "no weather provider available, logging disabled");
            e.to_string()
        });

        Self {
            provider,
            csv: CsvLogStore::new(config.storage.csv_path.clone()),
            database: SqliteLogStore::new(config.storage.database_path.clone()),
        }
    }

    /// Create the CSV file and the database table if missing.
    pub fn init(&self) -> Result<(), StorageError> {
        self.csv.ensure_file()?;
        self.database.ensure_schema()?;
        Ok(())
    }

    /// Fetch and record today's weather for `city`.
    ///
    /// The duplicate pre-check only looks at the CSV. A row already in the
    /// database but not in the CSV gets appended to the CSV and then
    /// rejected by the database.
    pub async fn log(&self, city: &str, date: NaiveDate) -> Result<LogOutcome, LogError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(LogError::EmptyCity);
        }

        if self.csv.exists(date, city)? {
            tracing::info!(%city, %date, "skipping, already in CSV");
            return Err(LogError::Duplicate { date, city: city.to_string() });
        }

        let provider = self
            .provider
            .as_ref()
            .map_err(|reason| ProviderError::NotConfigured(reason.clone()))?;
        let weather = provider.current_weather(city).await?;
        let record = WeatherRecord::new(date, city, &weather);

        self.csv.append(&record)?;

        match self.database.insert(&record) {
            Ok(()) => {
                tracing::info!(
                    city = %record.city,
                    %date,
                    temperature = record.temperature,
                    condition = %record.condition,
                    "logged weather"
                );
                Ok(LogOutcome::Logged(record))
            }
            Err(error) => {
                tracing::warn!(city = %record.city, %date, %error, "database rejected row");
                Ok(LogOutcome::DatabaseRejected { record, error })
            }
        }
    }

    pub fn listing(&self) -> Listing {
        Listing { csv: self.csv.list_all(), database: self.database.list_all() }
    }
}
