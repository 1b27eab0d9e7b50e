use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::filters::matches_filter;
use crate::models::{Attribute, Product, ProductFilter, ProductType};
use crate::services::repository::{AttributeRepository, ProductRepository, ProductTypeRepository, RepositoryError};

/// Default number of documents requested per page
const DEFAULT_PAGE_SIZE: usize = 100;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub products: String,
    pub attributes: String,
    pub product_types: String,
}

/// Appwrite document database client
///
/// Serves the catalog collections read by the search engine:
/// - Product type lookup by pid
/// - Full attribute listing
/// - Candidate product queries
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
    page_size: usize,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Override the number of documents fetched per request
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    /// Fetch every document of a collection matching the queries, page by page
    async fn list_documents<T>(&self, collection: &str, queries: &[String]) -> Result<Vec<T>, AppwriteError>
    where
        T: DeserializeOwned,
    {
        let url = self.documents_url(collection);
        let mut results = Vec::new();
        let mut offset = 0;

        loop {
            let mut page_queries = queries.to_vec();
            page_queries.push(format!("limit({})", self.page_size));
            page_queries.push(format!("offset({})", offset));

            let query_string = page_queries
                .iter()
                .map(|q| format!("queries[]={}", urlencoding::encode(q)))
                .collect::<Vec<_>>()
                .join("&");
            let full_url = format!("{}?{}", url, query_string);

            tracing::debug!("Listing documents: {}", full_url);

            let response = self
                .client
                .get(&full_url)
                .header("X-Appwrite-Key", &self.api_key)
                .header("X-Appwrite-Project", &self.project_id)
                .send()
                .await?;

            let status = response.status();
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(AppwriteError::Unauthorized);
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Failed to list {} documents: {} - {}", collection, status, body);
                return Err(AppwriteError::ApiError(format!(
                    "Failed to list {} documents: {}",
                    collection, status
                )));
            }

            let json: Value = response.json().await?;

            let documents = json
                .get("documents")
                .and_then(|d| d.as_array())
                .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

            let page_len = documents.len();

            for doc in documents {
                let data = doc.get("data").unwrap_or(doc);
                match serde_json::from_value::<T>(data.clone()) {
                    Ok(item) => results.push(item),
                    Err(e) => {
                        tracing::warn!(
                            "Skipping malformed {} document {:?}: {}",
                            collection,
                            doc.get("$id"),
                            e
                        );
                    }
                }
            }

            if page_len < self.page_size {
                break;
            }
            offset += page_len;
        }

        Ok(results)
    }
}

/// Build an Appwrite query string with a JSON-encoded value list
fn query(method: &str, attribute: &str, value: &impl serde::Serialize) -> Result<String, AppwriteError> {
    Ok(format!(
        "{}(\"{}\", [{}])",
        method,
        attribute,
        serde_json::to_string(value)?
    ))
}

#[async_trait]
impl ProductTypeRepository for AppwriteClient {
    async fn find_product_type(&self, pid: &str) -> Result<Option<ProductType>, RepositoryError> {
        // Documents without an isDeleted field are live, so deletion is checked here
        let queries = vec![query("equal", "pid", &pid)?];

        let product_types: Vec<ProductType> = self
            .list_documents(&self.collections.product_types, &queries)
            .await?;

        Ok(product_types.into_iter().find(|pt| pt.pid == pid && !pt.deleted()))
    }
}

#[async_trait]
impl AttributeRepository for AppwriteClient {
    async fn list_attributes(&self) -> Result<Vec<Attribute>, RepositoryError> {
        let attributes: Vec<Attribute> = self.list_documents(&self.collections.attributes, &[]).await?;

        tracing::debug!("Loaded {} attribute definitions", attributes.len());

        Ok(attributes)
    }
}

#[async_trait]
impl ProductRepository for AppwriteClient {
    /// Query candidates by product type, then apply the deletion, name and
    /// attribute constraints in process
    ///
    /// `notEqual("isDeleted", [true])` would also drop documents whose flag is
    /// null, and Appwrite cannot match nested attribute values.
    async fn find_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let queries = vec![query("equal", "productTypePid", &filter.product_type_pid)?];

        let products: Vec<Product> = self.list_documents(&self.collections.products, &queries).await?;
        let fetched = products.len();

        let matching: Vec<Product> = products
            .into_iter()
            .filter(|p| matches_filter(p, filter))
            .collect();

        tracing::debug!("Queried {} products, {} match the filter", fetched, matching.len());

        Ok(matching)
    }
}
