use rusqlite::{Connection, ffi, params};
use std::path::{Path, PathBuf};

use crate::{error::StorageError, model::WeatherRecord};

/// `weather_logs` table; the unique key is the authoritative duplicate check.
#[derive(Debug, Clone)]
pub struct SqliteLogStore {
    path: PathBuf,
}

impl SqliteLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Create the table if it does not exist yet.
    pub fn ensure_schema(&self) -> Result<(), StorageError> {
        let conn = self.connect()?;
        conn.execute_batch(
            r#"CREATE TABLE IF NOT EXISTS weather_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                log_date TEXT NOT NULL,
                city TEXT NOT NULL COLLATE NOCASE CHECK (length(city) <= 100),
                temperature REAL NOT NULL,
                "condition" TEXT NOT NULL CHECK (length("condition") <= 50),
                UNIQUE (log_date, city)
            );"#,
        )?;

        tracing::debug!(path = %self.path.display(), "weather_logs schema ready");
        Ok(())
    }

    /// Insert one row; a second row for the same date and city is `DuplicateKey`.
    pub fn insert(&self, record: &WeatherRecord) -> Result<(), StorageError> {
        let conn = self.connect()?;
        let result = conn.execute(
            r#"INSERT INTO weather_logs (log_date, city, temperature, "condition")
               VALUES (?1, ?2, ?3, ?4)"#,
            params![record.date, record.city, record.temperature, record.condition],
        );

        match result {
            Ok(_) => {
                tracing::debug!(city = %record.city, date = %record.date, "inserted database row");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(StorageError::DuplicateKey { date: record.date, city: record.city.clone() })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All rows, most recent date first.
    pub fn list_all(&self) -> Result<Vec<WeatherRecord>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"SELECT log_date, city, temperature, "condition"
               FROM weather_logs
               ORDER BY log_date DESC, id DESC"#,
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(WeatherRecord {
                    date: row.get(0)?,
                    city: row.get(1)?,
                    temperature: row.get(2)?,
                    condition: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}
