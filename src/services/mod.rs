// Service exports
pub mod appwrite;
pub mod geocode;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use geocode::{GeocodeClient, GeocodeError};
