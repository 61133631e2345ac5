use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range components
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let coordinate = Self { latitude, longitude };
        if coordinate.is_valid() {
            Some(coordinate)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// What kind of business a provider runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    Restaurant,
    HomeKitchen,
    EquipmentProvider,
    Other,
}

impl ProviderKind {
    /// Map a raw document value to a kind, tolerating unknown labels
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("restaurant") => Self::Restaurant,
            Some("home-kitchen") => Self::HomeKitchen,
            Some("equipment-provider") => Self::EquipmentProvider,
            _ => Self::Other,
        }
    }
}

impl Default for ProviderKind {
    fn default() -> Self {
        Self::Other
    }
}

/// A business listed in the catalog
///
/// Providers are read from the document store per discovery request and never
/// cached across requests. A provider whose stored coordinates were malformed
/// carries no coordinate; the postal code is the fallback for resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "postalCode", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "imageRef", default)]
    pub image_ref: Option<String>,
}

/// A sellable item belonging to one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offering {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "isVegetarian", default)]
    pub is_vegetarian: bool,
    #[serde(rename = "ownerRef")]
    pub owner_ref: String,
    #[serde(rename = "imageRef", default)]
    pub image_ref: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl Offering {
    /// Helper to get the rating as a number, defaulting the absent case to 0
    pub fn rating_or_default(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// An offering annotated with its provider's name and distance from the user
///
/// Derived on every join and never persisted. `distance_km` is absent when
/// the user location is unknown or the provider's coordinate never resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedOffering {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "isVegetarian", default)]
    pub is_vegetarian: bool,
    #[serde(rename = "ownerRef")]
    pub owner_ref: String,
    #[serde(rename = "imageRef", default)]
    pub image_ref: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "providerName")]
    pub provider_display_name: String,
    #[serde(rename = "distanceKm", default)]
    pub distance_km: Option<f64>,
}

impl EnrichedOffering {
    /// Helper to get the rating as a number, defaulting the absent case to 0
    pub fn rating_or_default(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

/// A provider annotated with its distance from the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedProvider {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "imageRef", default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "distanceKm", default)]
    pub distance_km: Option<f64>,
}

/// Multi-criteria filter over enriched offerings
///
/// The default criteria pass everything: no dietary restriction, no price
/// ceiling, a rating floor of zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(rename = "vegetarianOnly", default)]
    pub vegetarian_only: bool,
    #[serde(rename = "maxPrice", default)]
    pub max_price: Option<Decimal>,
    #[serde(rename = "minRating", default)]
    pub min_rating: f64,
}
