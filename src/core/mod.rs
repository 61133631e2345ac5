// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod joiner;
pub mod ranking;
pub mod refresh;
pub mod resolver;

pub use distance::{display_km, distance_km, InvalidCoordinate};
pub use filters::{apply_filters, matches_criteria};
pub use joiner::{join, UNKNOWN_PROVIDER};
pub use ranking::{rank_by_distance, top_rated};
pub use refresh::{Generation, LatestSlot, RefreshGate};
pub use resolver::CoordinateResolver;
