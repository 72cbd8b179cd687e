use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

use weatherlog_core::WeatherLogger;

use crate::output;

/// Numbered menu loop. Ends on `3` or end of input.
pub async fn run<R, W>(
    logger: &WeatherLogger,
    mut input: R,
    mut out: W,
    today: impl Fn() -> NaiveDate,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(out, "\nReal-Time Weather Logger")?;
        writeln!(out, "1. Add weather log")?;
        writeln!(out, "2. View weather logs")?;
        writeln!(out, "3. Exit")?;

        let Some(choice) = prompt(&mut input, &mut out, "Choose an option: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some(city) = prompt(&mut input, &mut out, "Enter your city name: ")? else {
                    break;
                };
                let result = logger.log(&city, today()).await;
                output::write_log_result(&result, &mut out)?;
            }
            "2" => output::write_listing(&logger.listing(), &mut out)?,
            "3" => break,
            _ => writeln!(out, "Invalid choice")?,
        }
    }

    out.flush()
}

/// Print `message`, read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}
