use std::collections::HashMap;

use crate::core::distance;
use crate::core::resolver::CoordinateResolver;
use crate::models::{Coordinate, EnrichedOffering, Offering, Provider};

/// Display name attached to offerings whose provider cannot be resolved
pub const UNKNOWN_PROVIDER: &str = "Unknown Provider";

/// Join offerings to their providers, attaching display name and distance
///
/// The provider index is keyed by both document id and username, so either
/// foreign-key convention in the stored data resolves; an id entry wins if
/// the two key spaces ever collide. An offering whose reference matches no
/// provider is kept with the fallback name and no distance, never dropped.
/// Output order matches input order.
pub async fn join(
    offerings: Vec<Offering>,
    providers: &[Provider],
    user_location: Option<Coordinate>,
    resolver: &mut CoordinateResolver<'_>,
) -> Vec<EnrichedOffering> {
    let mut index: HashMap<&str, &Provider> = HashMap::with_capacity(providers.len() * 2);

    // Username keys first so id keys win collisions
    for provider in providers {
        if let Some(username) = provider.username.as_deref() {
            index.insert(username, provider);
        }
    }
    for provider in providers {
        index.insert(provider.id.as_str(), provider);
    }

    let mut orphaned = 0usize;
    let mut enriched = Vec::with_capacity(offerings.len());

    for offering in offerings {
        let owner = index.get(offering.owner_ref.as_str()).copied();

        let (provider_display_name, distance_km) = match owner {
            Some(provider) => {
                let distance_km = match user_location {
                    Some(user) => match resolver.resolve(provider).await {
                        Some(at) => distance::distance_km(user, at).ok(),
                        None => None,
                    },
                    None => None,
                };
                (provider.display_name.clone(), distance_km)
            }
            None => {
                orphaned += 1;
                (UNKNOWN_PROVIDER.to_string(), None)
            }
        };

        enriched.push(EnrichedOffering {
            id: offering.id,
            title: offering.title,
            description: offering.description,
            price: offering.price,
            rating: offering.rating,
            is_vegetarian: offering.is_vegetarian,
            owner_ref: offering.owner_ref,
            image_ref: offering.image_ref,
            category: offering.category,
            provider_display_name,
            distance_km,
        });
    }

    if orphaned > 0 {
        tracing::debug!("{} offerings referenced no known provider", orphaned);
    }

    enriched
}
