// Model exports
pub mod cart;
pub mod domain;
pub mod requests;
pub mod responses;

pub use cart::{CartLine, CartState};
pub use domain::{Coordinate, EnrichedOffering, FilterCriteria, Offering, Provider, ProviderKind, RankedProvider};
pub use requests::{DiscoverQuery, FilterRequest, LocationQuery, PopularQuery};
pub use responses::{DiscoverResponse, ErrorResponse, HealthResponse, NearbyProvidersResponse, OfferingsResponse};
