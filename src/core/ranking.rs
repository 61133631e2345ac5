use std::cmp::Ordering;

use crate::core::distance;
use crate::models::{Coordinate, EnrichedOffering, Provider, RankedProvider};

/// Top offerings by rating, descending
///
/// The sort is stable: equally rated offerings keep their input order, so
/// repeated calls over the same data return the same list. An absent rating
/// ranks as zero. A limit beyond the set size returns the whole set.
pub fn top_rated(items: Vec<EnrichedOffering>, limit: usize) -> Vec<EnrichedOffering> {
    let mut ranked = items;

    ranked.sort_by(|a, b| {
        b.rating_or_default()
            .partial_cmp(&a.rating_or_default())
            .unwrap_or(Ordering::Equal)
    });

    ranked.truncate(limit);
    ranked
}

/// Rank providers ascending by distance from the user
///
/// Distance comes from each provider's already resolved coordinate. Without
/// a user location every distance is unknown and the input order is kept.
/// Providers with no resolvable coordinate sort last, stable among
/// themselves; equidistant providers keep their input order.
pub fn rank_by_distance(
    providers: Vec<Provider>,
    user_location: Option<Coordinate>,
) -> Vec<RankedProvider> {
    let mut ranked: Vec<RankedProvider> = providers
        .into_iter()
        .map(|provider| {
            let distance_km = match (user_location, provider.coordinate) {
                (Some(user), Some(at)) => distance::distance_km(user, at).ok(),
                _ => None,
            };

            RankedProvider {
                id: provider.id,
                display_name: provider.display_name,
                kind: provider.kind,
                address: provider.address,
                phone: provider.phone,
                image_ref: provider.image_ref,
                latitude: provider.coordinate.map(|c| c.latitude),
                longitude: provider.coordinate.map(|c| c.longitude),
                distance_km,
            }
        })
        .collect();

    ranked.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(da), Some(db)) => da.partial_cmp(&db).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    ranked
}
