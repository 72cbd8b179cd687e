use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{error::ProviderError, model::CurrentWeather};

use super::{WeatherProvider, truncate_body};

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaErrorDetail {
    message: Option<String>,
}

/// Error body, e.g. `{"error":{"code":1006,"message":"No matching location found."}}`.
#[derive(Debug, Deserialize)]
struct WaError {
    error: Option<WaErrorDetail>,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current_weather(&self, city: &str) -> Result<CurrentWeather, ProviderError> {
        let url = format!("{}/current.json", self.base_url);

        let res =
            self.http.get(&url).query(&[("key", self.api_key.as_str()), ("q", city)]).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "weatherapi request rejected");
            let parsed: WaError = serde_json::from_str(&body).map_err(|e| {
                ProviderError::Malformed(format!("WeatherAPI error response ({status}): {e}"))
            })?;
            let message = parsed
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(ProviderError::Api(message));
        }

        let parsed: WaResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("WeatherAPI response: {e}")))?;

        Ok(CurrentWeather {
            provider: "weatherapi".to_string(),
            location_name: format!("{}, {}", parsed.location.name, parsed.location.country),
            temperature_c: parsed.current.temp_c,
            condition: parsed.current.condition.text,
        })
    }
}
