use serde::{Deserialize, Serialize};

use crate::models::domain::{EnrichedOffering, RankedProvider};

/// Response for the nearby providers endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyProvidersResponse {
    pub providers: Vec<RankedProvider>,
    pub total_results: usize,
}

/// Response for the offering list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferingsResponse {
    pub offerings: Vec<EnrichedOffering>,
    pub total_results: usize,
}

/// Combined home view: nearby providers plus popular offerings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub providers: Vec<RankedProvider>,
    pub popular: Vec<EnrichedOffering>,
    pub refreshed_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
