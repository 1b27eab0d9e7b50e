use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::core::filters::matches_filter;
use crate::models::{Attribute, Product, ProductFilter, ProductType};
use crate::services::appwrite::AppwriteError;

/// Errors raised by a document store behind a repository
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Appwrite error: {0}")]
    Appwrite(#[from] AppwriteError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to product types
#[async_trait]
pub trait ProductTypeRepository: Send + Sync {
    /// Find a product type by pid, ignoring soft-deleted ones
    async fn find_product_type(&self, pid: &str) -> Result<Option<ProductType>, RepositoryError>;
}

/// Read access to attribute definitions
#[async_trait]
pub trait AttributeRepository: Send + Sync {
    /// List every attribute definition
    async fn list_attributes(&self) -> Result<Vec<Attribute>, RepositoryError>;
}

/// Read access to products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find the products matching a filter, in store order
    async fn find_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>;
}

/// In-process document store
///
/// Backs all three repositories from shared vectors. Useful for tests and
/// for running the service without an Appwrite instance.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    product_types: Arc<RwLock<Vec<ProductType>>>,
    attributes: Arc<RwLock<Vec<Attribute>>>,
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(product_types: Vec<ProductType>, attributes: Vec<Attribute>, products: Vec<Product>) -> Self {
        Self {
            product_types: Arc::new(RwLock::new(product_types)),
            attributes: Arc::new(RwLock::new(attributes)),
            products: Arc::new(RwLock::new(products)),
        }
    }

    pub fn insert_product_type(&self, product_type: ProductType) -> Result<(), RepositoryError> {
        self.product_types.write().map_err(poisoned)?.push(product_type);
        Ok(())
    }

    pub fn insert_attribute(&self, attribute: Attribute) -> Result<(), RepositoryError> {
        self.attributes.write().map_err(poisoned)?.push(attribute);
        Ok(())
    }

    pub fn insert_product(&self, product: Product) -> Result<(), RepositoryError> {
        self.products.write().map_err(poisoned)?.push(product);
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl ProductTypeRepository for InMemoryStore {
    async fn find_product_type(&self, pid: &str) -> Result<Option<ProductType>, RepositoryError> {
        let product_types = self.product_types.read().map_err(poisoned)?;
        Ok(product_types
            .iter()
            .find(|pt| pt.pid == pid && !pt.deleted())
            .cloned())
    }
}

#[async_trait]
impl AttributeRepository for InMemoryStore {
    async fn list_attributes(&self) -> Result<Vec<Attribute>, RepositoryError> {
        Ok(self.attributes.read().map_err(poisoned)?.clone())
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn find_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products
            .iter()
            .filter(|p| matches_filter(p, filter))
            .cloned()
            .collect())
    }
}
