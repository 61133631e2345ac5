use std::collections::HashMap;

use crate::models::{Coordinate, Provider};
use crate::services::GeocodeClient;

/// Resolves provider coordinates, with postal-code lookup as the fallback
///
/// One resolver serves one discovery request. Lookups are cached for that
/// request only, hits and misses alike, then discarded with it: the location
/// can change between requests, and a stale negative result must not outlive
/// the call that saw it.
pub struct CoordinateResolver<'a> {
    geocoder: &'a GeocodeClient,
    postal_cache: HashMap<String, Option<Coordinate>>,
}

impl<'a> CoordinateResolver<'a> {
    pub fn new(geocoder: &'a GeocodeClient) -> Self {
        Self {
            geocoder,
            postal_cache: HashMap::new(),
        }
    }

    /// Resolve one provider's coordinate
    ///
    /// A stored coordinate wins. Otherwise the postal code is looked up; a
    /// failed lookup degrades to `None`, is warned about once, and is not
    /// retried within the request.
    pub async fn resolve(&mut self, provider: &Provider) -> Option<Coordinate> {
        if let Some(coordinate) = provider.coordinate {
            return Some(coordinate);
        }

        let postal_code = provider.postal_code.as_deref()?;
        self.lookup_postal(postal_code).await
    }

    /// Backfill missing coordinates across a fleet before ranking
    pub async fn resolve_all(&mut self, providers: &mut [Provider]) {
        for provider in providers.iter_mut() {
            if provider.coordinate.is_none() {
                provider.coordinate = self.resolve(provider).await;
            }
        }
    }

    /// Number of distinct postal codes looked up so far
    pub fn postal_lookups(&self) -> usize {
        self.postal_cache.len()
    }

    async fn lookup_postal(&mut self, postal_code: &str) -> Option<Coordinate> {
        if let Some(cached) = self.postal_cache.get(postal_code) {
            return *cached;
        }

        let resolved = match self.geocoder.lookup(postal_code).await {
            Ok(coordinate) => Some(coordinate),
            Err(e) => {
                tracing::warn!("Geocode lookup failed for postal code {}: {}", postal_code, e);
                None
            }
        };

        self.postal_cache.insert(postal_code.to_string(), resolved);
        resolved
    }
}
