//! FTM Search - attribute-aware product search for the FTM catalog
//!
//! This library provides the ranking engine behind the product search
//! endpoint. Candidates matching a text query and product type are scored
//! against caller-supplied attribute requirements with type-specific
//! distance functions and returned in descending score order.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{SearchEngine, SearchError, SearchLimits};
pub use models::{AttributeData, AttributeRequirement, AttributeType, Hit, HitList, Product, ProductSearchQuery};
pub use services::{AppwriteClient, InMemoryStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let limits = SearchLimits::default();
        assert_eq!(limits.resolve(None), 10);
    }
}
