use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{
    apply_filters, display_km, join, rank_by_distance, top_rated, CoordinateResolver, LatestSlot,
    RefreshGate,
};
use crate::models::{
    DiscoverQuery, DiscoverResponse, EnrichedOffering, ErrorResponse, FilterRequest,
    HealthResponse, LocationQuery, NearbyProvidersResponse, OfferingsResponse, PopularQuery,
    RankedProvider,
};
use crate::services::{AppwriteClient, AppwriteError, GeocodeClient};

/// How many popular offerings the combined discover view carries
const DISCOVER_POPULAR_LIMIT: usize = 10;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub geocoder: Arc<GeocodeClient>,
    pub refresh_gate: Arc<RefreshGate>,
    pub latest_discover: Arc<LatestSlot<DiscoverResponse>>,
}

/// Configure all catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/providers/nearby", web::get().to(nearby_providers))
        .route("/providers/{id}/offerings", web::get().to(provider_offerings))
        .route("/offerings/popular", web::get().to(popular_offerings))
        .route("/offerings/filter", web::post().to(filter_offerings))
        .route("/offerings/category/{name}", web::get().to(category_offerings))
        .route("/discover", web::get().to(discover));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Nearby providers endpoint
///
/// GET /api/v1/providers/nearby?latitude={lat}&longitude={lon}
///
/// Returns every provider ranked by distance from the caller. Without a
/// location the full list comes back unranked with unknown distances.
async fn nearby_providers(
    state: web::Data<AppState>,
    query: web::Query<LocationQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for nearby providers request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let user_location = match query.user_location() {
        Ok(location) => location,
        Err(message) => return bad_request("Invalid location", message),
    };

    let mut providers = match state.appwrite.list_providers().await {
        Ok(providers) => providers,
        Err(e) => return store_failure("Failed to fetch providers", &e),
    };

    // Postal-code fallback only matters when there is a location to rank from
    if user_location.is_some() {
        let mut resolver = CoordinateResolver::new(&state.geocoder);
        resolver.resolve_all(&mut providers).await;
    }

    let ranked = rank_by_distance(providers, user_location);
    let total_results = ranked.len();

    tracing::info!("Returning {} nearby providers", total_results);

    HttpResponse::Ok().json(NearbyProvidersResponse {
        providers: round_provider_distances(ranked),
        total_results,
    })
}

/// Popular offerings endpoint
///
/// GET /api/v1/offerings/popular?latitude={lat}&longitude={lon}&limit={n}
///
/// Top-rated offerings across the whole catalog, enriched with provider
/// names and distances.
async fn popular_offerings(
    state: web::Data<AppState>,
    query: web::Query<PopularQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for popular offerings request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let user_location = match query.user_location() {
        Ok(location) => location,
        Err(message) => return bad_request("Invalid location", message),
    };

    let (offerings, providers) = match tokio::try_join!(
        state.appwrite.list_offerings(),
        state.appwrite.list_providers(),
    ) {
        Ok(fetched) => fetched,
        Err(e) => return store_failure("Failed to fetch catalog", &e),
    };

    let mut resolver = CoordinateResolver::new(&state.geocoder);
    let enriched = join(offerings, &providers, user_location, &mut resolver).await;
    let total_results = enriched.len();

    let popular = top_rated(enriched, query.limit as usize);

    tracing::info!(
        "Returning {} popular offerings (from {} total)",
        popular.len(),
        total_results
    );

    HttpResponse::Ok().json(OfferingsResponse {
        offerings: round_offering_distances(popular),
        total_results,
    })
}

/// Filter offerings endpoint
///
/// POST /api/v1/offerings/filter
///
/// Request body:
/// ```json
/// {
///   "items": [ ... ],
///   "criteria": {
///     "vegetarianOnly": true,
///     "maxPrice": "100",
///     "minRating": 4.0
///   }
/// }
/// ```
///
/// Pure re-filter of a previously returned offering set; nothing is fetched.
async fn filter_offerings(req: web::Json<FilterRequest>) -> impl Responder {
    let FilterRequest { items, criteria } = req.into_inner();
    let total_input = items.len();

    let filtered = apply_filters(items, &criteria);
    let total_results = filtered.len();

    tracing::debug!("Filtered {} offerings down to {}", total_input, total_results);

    HttpResponse::Ok().json(OfferingsResponse {
        offerings: filtered,
        total_results,
    })
}

/// Offerings for one provider
///
/// GET /api/v1/providers/{id}/offerings?latitude={lat}&longitude={lon}
async fn provider_offerings(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LocationQuery>,
) -> impl Responder {
    let provider_id = path.into_inner();

    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for provider offerings request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let user_location = match query.user_location() {
        Ok(location) => location,
        Err(message) => return bad_request("Invalid location", message),
    };

    let provider = match state.appwrite.get_provider(&provider_id).await {
        Ok(provider) => provider,
        Err(e) => return store_failure("Failed to fetch provider", &e),
    };

    let offerings = match state.appwrite.list_offerings_for(&provider).await {
        Ok(offerings) => offerings,
        Err(e) => return store_failure("Failed to fetch offerings", &e),
    };

    let mut resolver = CoordinateResolver::new(&state.geocoder);
    let enriched = join(
        offerings,
        std::slice::from_ref(&provider),
        user_location,
        &mut resolver,
    )
    .await;
    let total_results = enriched.len();

    tracing::info!(
        "Returning {} offerings for provider {}",
        total_results,
        provider_id
    );

    HttpResponse::Ok().json(OfferingsResponse {
        offerings: round_offering_distances(enriched),
        total_results,
    })
}

/// Offerings in one category
///
/// GET /api/v1/offerings/category/{name}?latitude={lat}&longitude={lon}
async fn category_offerings(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LocationQuery>,
) -> impl Responder {
    let category = path.into_inner();

    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for category offerings request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let user_location = match query.user_location() {
        Ok(location) => location,
        Err(message) => return bad_request("Invalid location", message),
    };

    let (offerings, providers) = match tokio::try_join!(
        state.appwrite.list_offerings_by_category(&category),
        state.appwrite.list_providers(),
    ) {
        Ok(fetched) => fetched,
        Err(e) => return store_failure("Failed to fetch category", &e),
    };

    let mut resolver = CoordinateResolver::new(&state.geocoder);
    let enriched = join(offerings, &providers, user_location, &mut resolver).await;
    let total_results = enriched.len();

    tracing::info!(
        "Returning {} offerings in category {}",
        total_results,
        category
    );

    HttpResponse::Ok().json(OfferingsResponse {
        offerings: round_offering_distances(enriched),
        total_results,
    })
}

/// Combined discovery endpoint
///
/// GET /api/v1/discover?latitude={lat}&longitude={lon}&limit={n}
///
/// One call backing the home view: nearby providers plus popular offerings.
/// Refreshes are generation-guarded; when a newer request lands mid-flight,
/// this one yields to the latest published view instead of overwriting it.
async fn discover(
    state: web::Data<AppState>,
    query: web::Query<DiscoverQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for discover request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let user_location = match query.user_location() {
        Ok(location) => location,
        Err(message) => return bad_request("Invalid location", message),
    };

    // Anything begun after this point supersedes us
    let generation = state.refresh_gate.begin();

    let (mut providers, offerings) = match tokio::try_join!(
        state.appwrite.list_providers(),
        state.appwrite.list_offerings(),
    ) {
        Ok(fetched) => fetched,
        Err(e) => return store_failure("Failed to refresh discover view", &e),
    };

    if !state.refresh_gate.is_current(generation) {
        if let Some(latest) = state.latest_discover.get() {
            tracing::debug!("Discover refresh superseded mid-flight, serving latest view");
            return HttpResponse::Ok().json(latest);
        }
    }

    let mut resolver = CoordinateResolver::new(&state.geocoder);
    if user_location.is_some() {
        resolver.resolve_all(&mut providers).await;
    }

    let popular = top_rated(
        join(offerings, &providers, user_location, &mut resolver).await,
        DISCOVER_POPULAR_LIMIT,
    );

    let mut ranked = rank_by_distance(providers, user_location);
    ranked.truncate(query.limit as usize);

    let view = DiscoverResponse {
        providers: round_provider_distances(ranked),
        popular: round_offering_distances(popular),
        refreshed_at: chrono::Utc::now(),
    };

    if state.latest_discover.publish(generation, view.clone()) {
        HttpResponse::Ok().json(view)
    } else {
        tracing::debug!("Discarding superseded discover view");
        match state.latest_discover.get() {
            Some(latest) => HttpResponse::Ok().json(latest),
            None => HttpResponse::Ok().json(view),
        }
    }
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Map an upstream store failure onto the response
///
/// An unknown document is the caller's 404; anything else means the catalog
/// store is unreachable or misbehaving, which is a 502.
fn store_failure(context: &str, e: &AppwriteError) -> HttpResponse {
    tracing::error!("{}: {}", context, e);

    match e {
        AppwriteError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: e.to_string(),
            status_code: 404,
        }),
        _ => HttpResponse::BadGateway().json(ErrorResponse {
            error: context.to_string(),
            message: e.to_string(),
            status_code: 502,
        }),
    }
}

/// Distances are carried at full precision internally and rounded to two
/// decimals only at the response boundary.
fn round_offering_distances(mut offerings: Vec<EnrichedOffering>) -> Vec<EnrichedOffering> {
    for offering in &mut offerings {
        if let Some(km) = offering.distance_km {
            offering.distance_km = Some(display_km(km));
        }
    }
    offerings
}

fn round_provider_distances(mut providers: Vec<RankedProvider>) -> Vec<RankedProvider> {
    for provider in &mut providers {
        if let Some(km) = provider.distance_km {
            provider.distance_km = Some(display_km(km));
        }
    }
    providers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_store_failure_maps_not_found_to_404() {
        let response = store_failure("test", &AppwriteError::NotFound("gone".to_string()));
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);

        let response = store_failure("test", &AppwriteError::Unauthorized);
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_GATEWAY);
    }
}
