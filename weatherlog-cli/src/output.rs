use std::io::{self, Write};

use weatherlog_core::{Listing, LogError, LogOutcome, StorageError, WeatherRecord};

pub fn write_log_result(
    result: &Result<LogOutcome, LogError>,
    out: &mut impl Write,
) -> io::Result<()> {
    match result {
        Ok(LogOutcome::Logged(record)) => writeln!(
            out,
            "Logged: {}°C {} in {} on {}",
            record.temperature, record.condition, record.city, record.date
        ),
        Ok(LogOutcome::DatabaseRejected { error, .. }) if error.is_duplicate() => {
            writeln!(out, "Entry for this city and date already exists in database.")
        }
        Ok(LogOutcome::DatabaseRejected { error, .. }) => writeln!(out, "{error}"),
        Err(e) => writeln!(out, "{e}"),
    }
}

/// CSV section in file order, then the database section most-recent-first.
pub fn write_listing(listing: &Listing, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n--- Weather Logs (CSV) ---")?;
    write_section(&listing.csv, out)?;

    writeln!(out, "\n--- Weather Logs (Database) ---")?;
    write_section(&listing.database, out)
}

fn write_section(
    rows: &Result<Vec<WeatherRecord>, StorageError>,
    out: &mut impl Write,
) -> io::Result<()> {
    match rows {
        Ok(rows) if rows.is_empty() => writeln!(out, "No Entries"),
        Ok(rows) => {
            for r in rows {
                writeln!(out, "{} | {} | {}°C | {}", r.date, r.city, r.temperature, r.condition)?;
            }
            Ok(())
        }
        Err(e) => writeln!(out, "Could not read log: {e}"),
    }
}
