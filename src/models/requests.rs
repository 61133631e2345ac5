use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Coordinate, EnrichedOffering, FilterCriteria};

/// Optional device location attached to a discovery request
///
/// The pair must be supplied together; a missing pair means distances stay
/// unknown rather than failing the request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl LocationQuery {
    pub fn user_location(&self) -> Result<Option<Coordinate>, String> {
        location_from(self.latitude, self.longitude)
    }
}

/// Location plus a result cap, for the popular and discover endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscoverQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[serde(default = "default_limit")]
    pub limit: u16,
}

impl DiscoverQuery {
    pub fn user_location(&self) -> Result<Option<Coordinate>, String> {
        location_from(self.latitude, self.longitude)
    }
}

fn default_limit() -> u16 {
    6
}

/// Location plus a result cap, for the popular-offerings endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PopularQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[serde(default = "default_popular_limit")]
    pub limit: u16,
}

impl PopularQuery {
    pub fn user_location(&self) -> Result<Option<Coordinate>, String> {
        location_from(self.latitude, self.longitude)
    }
}

fn default_popular_limit() -> u16 {
    10
}

/// Turn an optional latitude/longitude pair into a user location
///
/// Half a pair is a caller bug and rejected; a full pair is range-checked.
pub fn location_from(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<Coordinate>, String> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon)
            .map(Some)
            .ok_or_else(|| format!("latitude/longitude out of range: {}, {}", lat, lon)),
        (None, None) => Ok(None),
        _ => Err("latitude and longitude must be supplied together".to_string()),
    }
}

/// Request to re-filter a previously returned offering set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub items: Vec<EnrichedOffering>,
    #[serde(default)]
    pub criteria: FilterCriteria,
}
