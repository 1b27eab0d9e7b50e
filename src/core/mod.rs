// Core algorithm exports
pub mod engine;
pub mod filters;
pub mod scoring;
pub mod statistics;

pub use engine::{rank_products, resolve_requirements, SearchEngine, SearchError, SearchLimits};
pub use filters::{build_product_filter, matches_filter};
pub use scoring::{calculate_product_score, score_attribute};
pub use statistics::number_attribute_means;
