//! Core library for the `weatherlog` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Abstraction over weather providers
//! - The CSV and SQLite log stores
//! - The logging operation that ties them together
//!
//! It is used by `weatherlog-cli`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod logger;
pub mod model;
pub mod provider;
pub mod store;

pub use config::{Config, ProviderConfig, StorageConfig};
pub use error::{LogError, ProviderError, StorageError};
pub use logger::{Listing, LogOutcome, WeatherLogger};
pub use model::{CurrentWeather, WeatherRecord};
pub use provider::{ProviderId, WeatherProvider};
pub use store::{CsvLogStore, SqliteLogStore};
