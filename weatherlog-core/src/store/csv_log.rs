use chrono::NaiveDate;
use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

use crate::{error::StorageError, model::WeatherRecord};

const HEADER: [&str; 4] = ["Date", "City", "Temperature", "Condition"];

/// Append-only CSV log. The file is opened and closed on every call.
#[derive(Debug, Clone)]
pub struct CsvLogStore {
    path: PathBuf,
}

impl CsvLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with just the header row if it is missing or empty.
    pub fn ensure_file(&self) -> Result<(), StorageError> {
        self.open_for_append().map(|_| ())
    }

    /// Whether a row for `city` (any case) on `date` is already present.
    pub fn exists(&self, date: NaiveDate, city: &str) -> Result<bool, StorageError> {
        Ok(self.list_all()?.iter().any(|r| r.matches(date, city)))
    }

    pub fn append(&self, record: &WeatherRecord) -> Result<(), StorageError> {
        let file = self.open_for_append()?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);

        writer.serialize(record)?;
        writer.flush()?;

        tracing::debug!(path = %self.path.display(), city = %record.city, "appended CSV row");
        Ok(())
    }

    /// All rows in file order, oldest first.
    pub fn list_all(&self) -> Result<Vec<WeatherRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader.deserialize().collect::<Result<Vec<WeatherRecord>, _>>()?;

        Ok(records)
    }

    fn open_for_append(&self) -> Result<File, StorageError> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;

        if file.metadata()?.len() == 0 {
            let mut writer = csv::Writer::from_writer(&file);
            writer.write_record(HEADER)?;
            writer.flush()?;
            tracing::debug!(path = %self.path.display(), "created CSV log");
        }

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store() -> (TempDir, CsvLogStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvLogStore::new(dir.path().join("weather_logs.csv"));
        (dir, store)
    }

    fn record(day: u32, city: &str, temperature: f64, condition: &str) -> WeatherRecord {
        WeatherRecord {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            city: city.into(),
            temperature,
            condition: condition.into(),
        }
    }

    #[test]
    fn ensure_file_writes_header_once() {
        let (_dir, store) = store();

        store.ensure_file().unwrap();
        store.ensure_file().unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "Date,City,Temperature,Condition\n");
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn missing_file_lists_nothing_and_has_no_entries() {
        let (_dir, store) = store();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert!(store.list_all().unwrap().is_empty());
        assert!(!store.exists(date, "London").unwrap());
    }

    #[test]
    fn append_creates_file_with_header_and_row() {
        let (_dir, store) = store();

        store.append(&record(1, "London", 15.2, "Clouds")).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "Date,City,Temperature,Condition\n2024-05-01,London,15.2,Clouds\n");
    }

    #[test]
    fn list_all_keeps_insertion_order() {
        let (_dir, store) = store();

        store.append(&record(2, "Paris", -1.5, "Snow")).unwrap();
        store.append(&record(1, "London", 15.2, "Clouds")).unwrap();

        let rows = store.list_all().unwrap();
        assert_eq!(rows, vec![record(2, "Paris", -1.5, "Snow"), record(1, "London", 15.2, "Clouds")]);
    }

    #[test]
    fn exists_is_case_insensitive_on_city_and_exact_on_date() {
        let (_dir, store) = store();
        store.append(&record(1, "New York", 20.0, "Clear")).unwrap();

        let first = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let second = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();

        assert!(store.exists(first, "new york").unwrap());
        assert!(store.exists(first, "NEW YORK").unwrap());
        assert!(!store.exists(second, "New York").unwrap());
        assert!(!store.exists(first, "York").unwrap());
    }

    #[test]
    fn city_with_comma_is_quoted() {
        let (_dir, store) = store();
        let row = record(1, "Portland, Or", 12.0, "Rain");

        store.append(&row).unwrap();

        assert_eq!(store.list_all().unwrap(), vec![row]);
    }

    #[test]
    fn corrupt_row_is_a_storage_error() {
        let (_dir, store) = store();
        fs::write(store.path(), "Date,City,Temperature,Condition\nyesterday,London,warm,Clear\n")
            .unwrap();

        let err = store.list_all().unwrap_err();
        assert!(matches!(err, StorageError::Csv(_)));
    }
}
