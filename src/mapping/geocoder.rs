// src/mapping/geocoder.rs

use crate::config::Config;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("GOOGLE_MAPS_API_KEY is not set")]
    MissingApiKey,
    #[error("Invalid geocoder URL: {0}")]
    Url(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Geocoder returned HTTP {0}")]
    Http(u16),
    #[error("No geocode result (status {0})")]
    NoResult(String),
    #[error("Could not decode geocode response: {0}")]
    Decode(String),
}

/// Address in, coordinate out. One attempt per call.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> Result<LatLng, GeocodeError>;
}

// response
//  ├── status          "OK" | "ZERO_RESULTS" | "OVER_QUERY_LIMIT" | ...
//  └── results[]
//       └── geometry
//            └── location { lat, lng }

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

impl GeocodeResponse {
    fn first_location(self) -> Result<LatLng, GeocodeError> {
        if self.status != "OK" {
            return Err(GeocodeError::NoResult(self.status));
        }
        self.results
            .into_iter()
            .next()
            .map(|r| r.geometry.location)
            .ok_or(GeocodeError::NoResult(self.status))
    }
}

/// Google Geocoding REST API.
pub struct GoogleGeocoder {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GoogleGeocoder {
    pub fn new(client: Client, api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(client: &Client, config: &Config) -> Result<Self, GeocodeError> {
        let api_key = config
            .google_maps_api_key
            .as_deref()
            .ok_or(GeocodeError::MissingApiKey)?;

        Ok(Self::new(client.clone(), api_key, config.geocode_url.as_str()))
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> Result<LatLng, GeocodeError> {
        let url = url::Url::parse_with_params(
            &self.endpoint,
            &[("address", address), ("key", self.api_key.as_str())],
        )
        .map_err(|e| GeocodeError::Url(e.to_string()))?;

        let resp = self
            .client
            .get(url)
            .send()
            // The request URL carries the API key.
            .map_err(|e| GeocodeError::Network(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            return Err(GeocodeError::Http(resp.status().as_u16()));
        }

        let body: GeocodeResponse = resp
            .json()
            .map_err(|e| GeocodeError::Decode(e.without_url().to_string()))?;

        body.first_location()
    }
}
