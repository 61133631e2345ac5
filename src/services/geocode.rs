use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::Coordinate;

/// Errors from the postal-code lookup service
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Postal code not found: {0}")]
    NotFound(String),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the postal-code geocoding service
///
/// Resolves `GET {base_url}/{country}/{postal_code}` to the first listed
/// place. The service reports coordinates as strings.
pub struct GeocodeClient {
    base_url: String,
    country: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    places: Vec<GeocodePlace>,
}

#[derive(Debug, Deserialize)]
struct GeocodePlace {
    latitude: String,
    longitude: String,
}

impl GeocodeClient {
    /// Create a new geocode client
    ///
    /// The timeout is kept short: a slow lookup degrades one provider's
    /// distance, it must not stall the whole discovery request.
    pub fn new(base_url: String, country: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            country,
            client,
        }
    }

    /// Resolve a postal code to a coordinate
    pub async fn lookup(&self, postal_code: &str) -> Result<Coordinate, GeocodeError> {
        let url = format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.country,
            postal_code
        );

        tracing::debug!("Looking up postal code: {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(GeocodeError::NotFound(postal_code.to_string()));
        }

        if !response.status().is_success() {
            return Err(GeocodeError::ApiError(format!(
                "Failed to look up postal code: {}",
                response.status()
            )));
        }

        let parsed: GeocodeResponse = response.json().await?;

        let place = parsed.places.first().ok_or_else(|| {
            GeocodeError::InvalidResponse(format!("No places for postal code {}", postal_code))
        })?;

        let latitude: f64 = place.latitude.trim().parse().map_err(|_| {
            GeocodeError::InvalidResponse(format!("Unparseable latitude: {}", place.latitude))
        })?;
        let longitude: f64 = place.longitude.trim().parse().map_err(|_| {
            GeocodeError::InvalidResponse(format!("Unparseable longitude: {}", place.longitude))
        })?;

        Coordinate::new(latitude, longitude).ok_or_else(|| {
            GeocodeError::InvalidResponse(format!(
                "Out-of-range coordinate for postal code {}: {}, {}",
                postal_code, latitude, longitude
            ))
        })
    }
}
