// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! OpenWeatherMap current-weather client.
//!
//! Thin wrapper around the current weather endpoint. Each call to
//! [`TemperatureProvider::fetch_temperature`] makes exactly one outbound
//! request; memoization lives in the enricher, not here.

use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// OpenWeatherMap current weather endpoint.
const OPENWEATHER_API_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Errors that can occur during a single temperature fetch.
///
/// These are recoverable from the pipeline's point of view: the enricher
/// records the city as unavailable and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service answered with a non-success HTTP status.
    #[error("HTTP error: {status}")]
    Status { status: u16 },

    /// The request failed in transit or the response body did not decode
    /// into the expected shape.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Source of current temperatures for a coordinate.
///
/// The enricher depends on this trait rather than on the HTTP client so
/// tests can substitute canned providers.
pub trait TemperatureProvider {
    /// Fetch the current temperature in degrees Celsius.
    fn fetch_temperature(&self, coordinate: &Coordinate) -> Result<f64, FetchError>;
}

/// Blocking OpenWeatherMap client with a fixed metric-units query.
#[derive(Debug)]
pub struct OpenWeatherClient {
    api_key: String,
    http: reqwest::blocking::Client,
}

impl OpenWeatherClient {
    /// Create a client with an already-resolved API key.
    ///
    /// Credential resolution happens once, before construction; see
    /// [`crate::config::resolve_api_key`].
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Build the request URL for a coordinate.
    fn request_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{OPENWEATHER_API_URL}?lat={}&lon={}&units=metric&appid={}",
            coordinate.latitude, coordinate.longitude, self.api_key
        )
    }
}

impl TemperatureProvider for OpenWeatherClient {
    fn fetch_temperature(&self, coordinate: &Coordinate) -> Result<f64, FetchError> {
        let url = self.request_url(coordinate);
        debug!(
            "Fetching weather for {:.4},{:.4}",
            coordinate.latitude, coordinate.longitude
        );

        let response = self.http.get(&url).send()?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let data: WeatherResponse = response.json()?;
        Ok(data.main.temp)
    }
}

/// Current weather response from OpenWeatherMap.
///
/// Only `main.temp` is extracted; the rest of the payload is discarded.
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: MainConditions,
}

#[derive(Debug, Deserialize)]
struct MainConditions {
    temp: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_contains_query_parameters() {
        let client = OpenWeatherClient::new("secret123".to_string());
        let url = client.request_url(&Coordinate {
            latitude: 4.70159,
            longitude: -74.1469,
        });

        assert!(url.starts_with(OPENWEATHER_API_URL));
        assert!(url.contains("lat=4.70159"));
        assert!(url.contains("lon=-74.1469"));
        assert!(url.contains("units=metric"));
        assert!(url.contains("appid=secret123"));
    }

    #[test]
    fn test_response_decodes_temperature_and_ignores_extras() {
        let body = r#"{
            "coord": {"lon": -74.1469, "lat": 4.70159},
            "weather": [{"id": 803, "main": "Clouds"}],
            "main": {"temp": 13.08, "feels_like": 12.49, "pressure": 1028},
            "name": "Bogota"
        }"#;

        let parsed: WeatherResponse = serde_json::from_str(body).unwrap();
        assert!((parsed.main.temp - 13.08).abs() < f64::EPSILON);
    }

    #[test]
    fn test_response_without_temp_field_fails_to_decode() {
        let body = r#"{"main": {"pressure": 1028}}"#;
        assert!(serde_json::from_str::<WeatherResponse>(body).is_err());

        let body = r#"{"cod": 401, "message": "Invalid API key"}"#;
        assert!(serde_json::from_str::<WeatherResponse>(body).is_err());
    }
}
