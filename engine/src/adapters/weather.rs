//! OpenWeatherMap current-conditions adapter

use super::{ensure_success, settle, AdapterError, AdapterResult, Provider, WeatherProvider};
use crate::config::WeatherConfig;
use crate::secrets::SecretString;
use async_trait::async_trait;
use sdk::{DataSource, LocationQuery, WeatherRecord};
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize)]
struct WeatherResponse {
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    wind: Option<WindBlock>,
}

#[derive(Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: f64,
}

#[derive(Deserialize)]
struct ConditionBlock {
    description: String,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: Option<f64>,
}

pub struct OpenWeatherAdapter {
    config: WeatherConfig,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl OpenWeatherAdapter {
    pub fn new(config: WeatherConfig, api_key: Option<SecretString>) -> Self {
        Self {
            config,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, query: &LocationQuery) -> Result<WeatherRecord, AdapterError> {
        let api_key = self.api_key.as_ref().ok_or(AdapterError::NotConfigured)?;

        let coordinates = query.coordinates();
        let url = format!("{}/weather", self.config.base_url.trim_end_matches('/'));

        tracing::debug!(
            "Fetching weather for {} at ({}, {})",
            query.display_name(),
            coordinates.lat,
            coordinates.lng
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lng.to_string()),
                ("appid", api_key.unsecure().to_string()),
                ("units", self.config.units.clone()),
            ])
            .timeout(Duration::from_millis(self.config.timeout_ms))
            .send()
            .await?;

        let data: WeatherResponse = ensure_success(response)?.json().await?;

        let condition = data
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| AdapterError::Parse("No weather conditions in response".to_string()))?;

        Ok(WeatherRecord {
            location: query.display_name().to_string(),
            temperature: data.main.temp.round() as i32,
            description: condition.description,
            humidity: data.main.humidity.round().clamp(0.0, 100.0) as u8,
            wind_speed: data.wind.and_then(|wind| wind.speed).unwrap_or(0.0),
            icon: condition.icon,
            data_source: DataSource::live(Provider::Weather.label()),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherAdapter {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn current(&self, query: &LocationQuery) -> AdapterResult<WeatherRecord> {
        settle(Provider::Weather, self.fetch(query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_requires_main_block() {
        let body = r#"{"weather":[{"description":"clear sky"}]}"#;
        assert!(serde_json::from_str::<WeatherResponse>(body).is_err());
    }

    #[test]
    fn test_wind_is_optional() {
        let body = r#"{"main":{"temp":21.6,"humidity":40},"weather":[{"description":"few clouds","icon":"02d"}]}"#;
        let parsed: WeatherResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.wind.is_none());
        assert_eq!(parsed.weather[0].icon.as_deref(), Some("02d"));
    }
}
