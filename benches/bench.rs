// Criterion benchmarks for the NearCart catalog service

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use nearcart_catalog::core::{
    apply_filters, distance_km, join, rank_by_distance, top_rated, CoordinateResolver,
};
use nearcart_catalog::models::{
    Coordinate, EnrichedOffering, FilterCriteria, Offering, Provider, ProviderKind,
};
use nearcart_catalog::services::GeocodeClient;
use rust_decimal::Decimal;

fn create_provider(id: usize, lat: f64, lon: f64) -> Provider {
    Provider {
        id: format!("provider_{}", id),
        display_name: format!("Provider {}", id),
        kind: ProviderKind::Restaurant,
        username: Some(format!("user_{}", id)),
        coordinate: Coordinate::new(lat, lon),
        address: None,
        phone: None,
        postal_code: None,
        image_ref: None,
    }
}

fn create_offering(id: usize, owner: usize) -> Offering {
    Offering {
        id: format!("item_{}", id),
        title: format!("Item {}", id),
        description: String::new(),
        price: Decimal::from(40 + (id % 200) as u32),
        rating: Some((id % 51) as f64 / 10.0),
        is_vegetarian: id % 2 == 0,
        owner_ref: format!("provider_{}", owner),
        image_ref: String::new(),
        category: Some("meals".to_string()),
    }
}

fn create_enriched(id: usize) -> EnrichedOffering {
    EnrichedOffering {
        id: format!("item_{}", id),
        title: format!("Item {}", id),
        description: String::new(),
        price: Decimal::from(40 + (id % 200) as u32),
        rating: Some((id % 51) as f64 / 10.0),
        is_vegetarian: id % 2 == 0,
        owner_ref: format!("provider_{}", id % 50),
        image_ref: String::new(),
        category: Some("meals".to_string()),
        provider_display_name: format!("Provider {}", id % 50),
        distance_km: Some((id % 30) as f64 + 0.37),
    }
}

fn bench_distance(c: &mut Criterion) {
    let user = Coordinate::new(13.0827, 80.2707).unwrap();
    let venue = Coordinate::new(13.0604, 80.2496).unwrap();

    c.bench_function("distance_km", |b| {
        b.iter(|| distance_km(black_box(user), black_box(venue)));
    });
}

fn bench_join(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    // Never contacted: every provider already carries a coordinate
    let geocoder = GeocodeClient::new("http://127.0.0.1:1".to_string(), "in".to_string(), 1);
    let user = Coordinate::new(13.0827, 80.2707);

    let providers: Vec<Provider> = (0..50)
        .map(|i| create_provider(i, 13.0 + i as f64 * 0.002, 80.2 + i as f64 * 0.002))
        .collect();

    let mut group = c.benchmark_group("join");

    for offering_count in [10, 100, 1000].iter() {
        let offerings: Vec<Offering> = (0..*offering_count)
            .map(|i| create_offering(i, i % 50))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("offerings", offering_count),
            offering_count,
            |b, _| {
                b.iter(|| {
                    runtime.block_on(async {
                        let mut resolver = CoordinateResolver::new(&geocoder);
                        join(
                            black_box(offerings.clone()),
                            black_box(&providers),
                            user,
                            &mut resolver,
                        )
                        .await
                    })
                });
            },
        );
    }

    group.finish();
}

fn bench_top_rated(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_rated");

    for item_count in [10, 100, 1000].iter() {
        let items: Vec<EnrichedOffering> = (0..*item_count).map(create_enriched).collect();

        group.bench_with_input(
            BenchmarkId::new("items", item_count),
            item_count,
            |b, _| {
                b.iter(|| top_rated(black_box(items.clone()), black_box(10)));
            },
        );
    }

    group.finish();
}

fn bench_rank_by_distance(c: &mut Criterion) {
    let user = Coordinate::new(13.0827, 80.2707);

    let mut group = c.benchmark_group("rank_providers");

    for provider_count in [10, 100, 500].iter() {
        let providers: Vec<Provider> = (0..*provider_count)
            .map(|i| create_provider(i, 12.9 + i as f64 * 0.001, 80.1 + i as f64 * 0.001))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("providers", provider_count),
            provider_count,
            |b, _| {
                b.iter(|| rank_by_distance(black_box(providers.clone()), black_box(user)));
            },
        );
    }

    group.finish();
}

fn bench_filtering(c: &mut Criterion) {
    let items: Vec<EnrichedOffering> = (0..1000).map(create_enriched).collect();

    let criteria = FilterCriteria {
        vegetarian_only: true,
        max_price: Some(Decimal::from(120u32)),
        min_rating: 3.5,
    };

    c.bench_function("apply_filters_1000_items", |b| {
        b.iter(|| apply_filters(black_box(items.clone()), black_box(&criteria)));
    });
}

criterion_group!(
    benches,
    bench_distance,
    bench_join,
    bench_top_rated,
    bench_rank_by_distance,
    bench_filtering
);

criterion_main!(benches);
