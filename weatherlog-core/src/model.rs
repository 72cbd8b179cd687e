use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current conditions as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub provider: String,
    pub location_name: String,
    pub temperature_c: f64,
    pub condition: String,
}

/// One logged observation. Field names double as the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Condition")]
    pub condition: String,
}

impl WeatherRecord {
    /// Build a record from provider output, title-casing the city.
    pub fn new(date: NaiveDate, city: &str, weather: &CurrentWeather) -> Self {
        Self {
            date,
            city: title_case(city.trim()),
            temperature: weather.temperature_c,
            condition: weather.condition.clone(),
        }
    }

    /// Same day, same city ignoring case.
    pub fn matches(&self, date: NaiveDate, city: &str) -> bool {
        self.date == date && self.city.to_lowercase() == city.trim().to_lowercase()
    }
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
///
/// Any non-alphabetic character starts a new word, so `o'neil` becomes
/// `O'Neil` and `saint-étienne` becomes `Saint-Étienne`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for ch in input.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}
