use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::ProviderError, model::CurrentWeather};

use super::{WeatherProvider, truncate_body};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

/// Error body, e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
struct OwError {
    message: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, ProviderError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "openweather request rejected");
            let parsed: OwError = serde_json::from_str(&body).map_err(|e| {
                ProviderError::Malformed(format!("OpenWeather error response ({status}): {e}"))
            })?;
            let message = parsed.message.unwrap_or_else(|| "Unknown error".to_string());
            return Err(ProviderError::Api(message));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("OpenWeather response: {e}")))?;

        let condition = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .ok_or_else(|| {
                ProviderError::Malformed("OpenWeather response contained no conditions".into())
            })?;

        Ok(CurrentWeather {
            provider: "openweather".to_string(),
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            condition,
        })
    }
}
