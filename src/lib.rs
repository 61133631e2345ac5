//! NearCart Catalog - Location-aware catalog service for the NearCart marketplace
//!
//! This library aggregates provider and offering catalogs from Appwrite,
//! enriches them with distances from the caller's location, and serves the
//! discovery views (nearby, popular, filtered, per-provider) behind them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance_km, display_km, apply_filters, join, rank_by_distance, top_rated};
pub use crate::models::{
    Coordinate, EnrichedOffering, FilterCriteria, Offering, Provider, ProviderKind, RankedProvider,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let east = Coordinate::new(0.0, 1.0).unwrap();
        let km = distance_km(origin, east).unwrap();
        assert!(km > 100.0);
    }
}
