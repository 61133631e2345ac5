use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::{Coordinate, Offering, Provider, ProviderKind};

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Read-only access to the catalog collections. Documents are validated and
/// normalized here, at the ingestion boundary: numeric fields stored as
/// strings parse leniently, out-of-range values ingest as absent, and
/// documents too malformed to use are skipped with a warning rather than
/// failing the whole fetch. Consumers downstream never re-check shapes.
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
    fetch_limit: u16,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub providers: String,
    pub offerings: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
        fetch_limit: u16,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
            fetch_limit,
        }
    }

    /// Fetch every provider in the catalog
    pub async fn list_providers(&self) -> Result<Vec<Provider>, AppwriteError> {
        let queries = vec![format!("limit({})", self.fetch_limit)];
        let documents = self
            .list_documents(&self.collections.providers, &queries)
            .await?;

        Ok(parse_provider_docs(&documents))
    }

    /// Fetch a single provider by document ID
    pub async fn get_provider(&self, provider_id: &str) -> Result<Provider, AppwriteError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.providers,
            provider_id
        );

        tracing::debug!("Fetching provider: {}", provider_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!(
                "Provider {} not found",
                provider_id
            )));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }

        if !status.is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to fetch provider: {}",
                status
            )));
        }

        let doc: Value = response.json().await?;

        let parsed: ProviderDoc = serde_json::from_value(document_payload(&doc))
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse provider: {}", e)))?;

        Ok(provider_from_doc(parsed))
    }

    /// Fetch every offering in the catalog
    pub async fn list_offerings(&self) -> Result<Vec<Offering>, AppwriteError> {
        let queries = vec![format!("limit({})", self.fetch_limit)];
        let documents = self
            .list_documents(&self.collections.offerings, &queries)
            .await?;

        Ok(parse_offering_docs(&documents))
    }

    /// Fetch the offerings belonging to one provider
    ///
    /// Matches the reference field against both the provider's id and its
    /// username, since stored offerings use either convention.
    pub async fn list_offerings_for(
        &self,
        provider: &Provider,
    ) -> Result<Vec<Offering>, AppwriteError> {
        let mut keys = vec![format!("\"{}\"", provider.id)];
        if let Some(username) = &provider.username {
            keys.push(format!("\"{}\"", username));
        }

        let queries = vec![
            format!("equal(\"ownerRef\", [{}])", keys.join(",")),
            format!("limit({})", self.fetch_limit),
        ];

        let documents = self
            .list_documents(&self.collections.offerings, &queries)
            .await?;

        Ok(parse_offering_docs(&documents))
    }

    /// Fetch the offerings in one category
    pub async fn list_offerings_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Offering>, AppwriteError> {
        let queries = vec![
            format!("equal(\"category\", \"{}\")", category),
            format!("limit({})", self.fetch_limit),
        ];

        let documents = self
            .list_documents(&self.collections.offerings, &queries)
            .await?;

        Ok(parse_offering_docs(&documents))
    }

    async fn list_documents(
        &self,
        collection: &str,
        queries: &[String],
    ) -> Result<Vec<Value>, AppwriteError> {
        // Build Appwrite query format: JSON array of query strings
        let queries_json = serde_json::to_string(queries).unwrap();
        let encoded_queries = urlencoding::encode(&queries_json);

        let url = format!(
            "{}/databases/{}/collections/{}/documents?query={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection,
            encoded_queries
        );

        tracing::debug!("Listing documents from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }

        if !status.is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to list documents: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        tracing::debug!("Listed {} documents (total: {})", documents.len(), total);

        Ok(documents.clone())
    }
}

/// Raw provider document as stored in Appwrite
#[derive(Debug, Deserialize)]
struct ProviderDoc {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "displayName", alias = "name")]
    display_name: String,
    #[serde(rename = "providerType", default)]
    provider_type: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    longitude: Option<f64>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(rename = "postalCode", default, deserialize_with = "lenient_string")]
    postal_code: Option<String>,
    #[serde(rename = "imageFileId", default)]
    image_file_id: Option<String>,
}

/// Raw offering document as stored in Appwrite
#[derive(Debug, Deserialize)]
struct OfferingDoc {
    #[serde(rename = "$id")]
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_f64")]
    rating: Option<f64>,
    #[serde(rename = "isVeg", default)]
    is_veg: bool,
    #[serde(rename = "ownerRef")]
    owner_ref: String,
    #[serde(rename = "imageFileId", default)]
    image_file_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    category: Option<String>,
}

/// Some deployments nest document fields under `data` next to `$id`; newer
/// ones inline everything. Normalize to one flat object.
fn document_payload(doc: &Value) -> Value {
    match doc.get("data") {
        Some(data) => {
            let mut merged = data.clone();
            if let (Some(fields), Some(id)) = (merged.as_object_mut(), doc.get("$id")) {
                fields.entry("$id").or_insert_with(|| id.clone());
            }
            merged
        }
        None => doc.clone(),
    }
}

fn provider_from_doc(doc: ProviderDoc) -> Provider {
    // Malformed or out-of-range coordinates ingest as absent
    let coordinate = match (doc.latitude, doc.longitude) {
        (Some(latitude), Some(longitude)) => Coordinate::new(latitude, longitude),
        _ => None,
    };

    Provider {
        id: doc.id,
        display_name: doc.display_name,
        kind: ProviderKind::from_raw(doc.provider_type.as_deref()),
        username: doc.username,
        coordinate,
        address: doc.address,
        phone: doc.phone,
        postal_code: doc.postal_code,
        image_ref: doc.image_file_id,
    }
}

fn offering_from_doc(doc: OfferingDoc) -> Option<Offering> {
    let price = match doc.price {
        Some(price) if price >= Decimal::ZERO => price,
        Some(price) => {
            tracing::warn!("Skipping offering {} with negative price {}", doc.id, price);
            return None;
        }
        None => {
            tracing::warn!("Skipping offering {} with missing or unparseable price", doc.id);
            return None;
        }
    };

    // Out-of-range ratings are treated as absent, not clamped
    let rating = doc.rating.filter(|r| r.is_finite() && (0.0..=5.0).contains(r));

    Some(Offering {
        id: doc.id,
        title: doc.title,
        description: doc.description.unwrap_or_default(),
        price,
        rating,
        is_vegetarian: doc.is_veg,
        owner_ref: doc.owner_ref,
        image_ref: doc.image_file_id.unwrap_or_default(),
        category: doc.category,
    })
}

fn parse_provider_docs(documents: &[Value]) -> Vec<Provider> {
    let mut providers = Vec::with_capacity(documents.len());
    let mut skipped = 0usize;

    for doc in documents {
        match serde_json::from_value::<ProviderDoc>(document_payload(doc)) {
            Ok(parsed) => providers.push(provider_from_doc(parsed)),
            Err(e) => {
                skipped += 1;
                tracing::warn!("Skipping malformed provider document: {}", e);
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} of {} provider documents", skipped, documents.len());
    }

    providers
}

fn parse_offering_docs(documents: &[Value]) -> Vec<Offering> {
    let mut offerings = Vec::with_capacity(documents.len());
    let mut skipped = 0usize;

    for doc in documents {
        match serde_json::from_value::<OfferingDoc>(document_payload(doc)) {
            Ok(parsed) => match offering_from_doc(parsed) {
                Some(offering) => offerings.push(offering),
                None => skipped += 1,
            },
            Err(e) => {
                skipped += 1;
                tracing::warn!("Skipping malformed offering document: {}", e);
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} of {} offering documents", skipped, documents.len());
    }

    offerings
}

/// Accept a number or a numeric string; anything else reads as absent
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Accept a number or a numeric string as a decimal amount
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Accept a string or a number, normalized to a non-empty string
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}
