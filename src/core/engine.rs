use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::core::{
    filters::build_product_filter,
    scoring::calculate_product_score,
    statistics::number_attribute_means,
};
use crate::models::{AttributeData, AttributeMap, AttributeRequirement, Hit, HitList, Product, ProductSearchQuery};
use crate::services::repository::{AttributeRepository, ProductRepository, ProductTypeRepository, RepositoryError};

/// Errors that can occur during a product search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl SearchError {
    /// Stable error code reported to API consumers
    pub fn error_code(&self) -> &'static str {
        match self {
            SearchError::InvalidQuery(_) => "exception.query.InvalidQuery",
            SearchError::NotFound(_) => "exception.producttype.NotFound",
            SearchError::Repository(_) => "exception",
        }
    }
}

/// Hit limits and request policy
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub default_limit: usize,
    pub max_limit: usize,
    /// Reject searches without any attribute requirement
    pub require_requirements: bool,
}

impl SearchLimits {
    /// Resolve the effective hit limit for a request
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
            require_requirements: true,
        }
    }
}

/// Product search orchestrator
///
/// # Pipeline Stages
/// 1. Query validation (search text, product type, requirements)
/// 2. Candidate retrieval through the product repository
/// 3. Per-attribute statistics over the candidate set
/// 4. Scoring and ranking
///
/// The engine keeps no per-request state; attribute definitions are read
/// again on every search.
#[derive(Clone)]
pub struct SearchEngine {
    product_types: Arc<dyn ProductTypeRepository>,
    attributes: Arc<dyn AttributeRepository>,
    products: Arc<dyn ProductRepository>,
    limits: SearchLimits,
}

impl SearchEngine {
    pub fn new(
        product_types: Arc<dyn ProductTypeRepository>,
        attributes: Arc<dyn AttributeRepository>,
        products: Arc<dyn ProductRepository>,
        limits: SearchLimits,
    ) -> Self {
        Self {
            product_types,
            attributes,
            products,
            limits,
        }
    }

    /// Build an engine whose repositories are all served by one store
    pub fn from_store<S>(store: Arc<S>, limits: SearchLimits) -> Self
    where
        S: ProductTypeRepository + AttributeRepository + ProductRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store, limits)
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Search products and rank them by relevance to the requirements
    ///
    /// # Arguments
    /// * `query` - Search text, product type, attribute requirements and paging
    ///
    /// # Returns
    /// HitList sorted by descending score. `max_score` is 0.0 when nothing matched.
    ///
    /// # Errors
    /// * `InvalidQuery` - empty search text, unknown or malformed requirement,
    ///   or no requirement while requirements are mandatory
    /// * `NotFound` - the product type does not exist or is deleted
    /// * `Repository` - the underlying store failed
    pub async fn search_products(&self, query: &ProductSearchQuery) -> Result<HitList<Product>, SearchError> {
        let search_text = match query.search_text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => return Err(SearchError::InvalidQuery("Invalid search query!".to_string())),
        };

        let limit = self.limits.resolve(query.limit);

        match self.product_types.find_product_type(&query.product_type_pid).await? {
            Some(product_type) if !product_type.deleted() => {}
            _ => {
                return Err(SearchError::NotFound(format!(
                    "Invalid product type specified: {}",
                    query.product_type_pid
                )));
            }
        }

        let attributes: AttributeMap = self
            .attributes
            .list_attributes()
            .await?
            .into_iter()
            .map(|a| (a.pid.clone(), a))
            .collect();

        let (requirement_values, attribute_pids) = resolve_requirements(&query.requirements, &attributes)?;

        if attribute_pids.is_empty() && self.limits.require_requirements {
            return Err(SearchError::InvalidQuery("Requirements length must be > 0!".to_string()));
        }

        let filter = build_product_filter(search_text, &query.product_type_pid, &attribute_pids);
        let candidates = self.products.find_products(&filter).await?;

        tracing::debug!(
            "Found {} candidates for '{}' in product type {}",
            candidates.len(),
            search_text,
            query.product_type_pid
        );

        let hits: Vec<Hit<Product>> = rank_products(candidates, &requirement_values, &attributes)
            .into_iter()
            .skip(query.offset)
            .take(limit)
            .collect();

        let result = HitList::from_sorted(hits);

        tracing::info!(
            "Returning {} hits for '{}' (max score: {})",
            result.total,
            search_text,
            result.max_score
        );

        Ok(result)
    }
}

/// Validate requirements against the attribute definitions
///
/// Returns the requested value per attribute pid and the distinct requested
/// attribute pids in request order. A repeated attribute keeps its last value.
pub fn resolve_requirements(
    requirements: &[AttributeRequirement],
    attributes: &AttributeMap,
) -> Result<(HashMap<String, AttributeData>, Vec<String>), SearchError> {
    let mut values = HashMap::with_capacity(requirements.len());
    let mut attribute_pids = Vec::with_capacity(requirements.len());

    for requirement in requirements {
        let attribute = attributes.get(&requirement.attribute_pid).ok_or_else(|| {
            SearchError::InvalidQuery(format!("Unknown attribute: {}", requirement.attribute_pid))
        })?;

        if requirement.value.kind() != attribute.attribute_type {
            return Err(SearchError::InvalidQuery(format!(
                "Attribute {} expects a {} value, got {}",
                attribute.pid,
                attribute.attribute_type,
                requirement.value.kind()
            )));
        }

        requirement.value.check_well_formed().map_err(|reason| {
            SearchError::InvalidQuery(format!("Invalid value for attribute {}: {}", attribute.pid, reason))
        })?;

        if values
            .insert(requirement.attribute_pid.clone(), requirement.value.clone())
            .is_none()
        {
            attribute_pids.push(requirement.attribute_pid.clone());
        }
    }

    Ok((values, attribute_pids))
}

/// Score candidates and sort them by descending score
///
/// The sort is stable: equal scores keep the candidates' original order.
pub fn rank_products(
    candidates: Vec<Product>,
    requirements: &HashMap<String, AttributeData>,
    attributes: &AttributeMap,
) -> Vec<Hit<Product>> {
    let means = number_attribute_means(&candidates, attributes);

    let mut hits: Vec<Hit<Product>> = candidates
        .into_iter()
        .map(|product| {
            let score = calculate_product_score(&product, requirements, attributes, &means);
            Hit { hit: product, score }
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    hits
}
