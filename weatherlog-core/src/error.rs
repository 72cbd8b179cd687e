//! Error taxonomy for logging operations.
//!
//! Every variant here is reported to the user and the session carries on;
//! only startup failures (config, schema setup) end the process, and those
//! travel as `anyhow::Error`.

use chrono::NaiveDate;
use thiserror::Error;

/// Failure talking to a weather provider. Never retried.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Non-success HTTP status; carries the provider's own message.
    #[error("API Error: {0}")]
    Api(String),

    #[error("Failed to fetch API data: {0}")]
    Request(#[from] reqwest::Error),

    /// Body that could not be decoded, on success or error status.
    #[error("Failed to fetch API data: {0}")]
    Malformed(String),

    /// No usable provider in the configuration; carries the setup hint.
    #[error("{0}")]
    NotConfigured(String),
}

/// Failure reading or writing one of the two log stores.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("entry for {city} on {date} already exists")]
    DuplicateKey { date: NaiveDate, city: String },

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StorageError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StorageError::DuplicateKey { .. })
    }
}

/// Why a log attempt stopped before reaching the database.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("City name must not be empty.")]
    EmptyCity,

    /// The flat-file pre-check found an entry for this city and date.
    #[error("Entry for {city} on {date} already exists (CSV check).")]
    Duplicate { date: NaiveDate, city: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("CSV log error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_api_error_shows_provider_message() {
        let err = LogError::from(ProviderError::Api("city not found".into()));
        assert_eq!(err.to_string(), "API Error: city not found");
    }

    #[test]
    fn duplicate_key_is_recognized() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let dup = StorageError::DuplicateKey { date, city: "London".into() };
        let other = StorageError::Io(std::io::Error::other("disk full"));

        assert!(dup.is_duplicate());
        assert!(!other.is_duplicate());
    }
}
