//! The two places a [`WeatherRecord`](crate::WeatherRecord) is written to.
//!
//! Each store enforces one-record-per-(date, city) on its own; nothing ties a
//! write in one to a write in the other.

pub mod csv_log;
pub mod sqlite_log;

pub use csv_log::CsvLogStore;
pub use sqlite_log::SqliteLogStore;
