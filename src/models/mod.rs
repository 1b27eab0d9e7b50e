// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Attribute, AttributeData, AttributeMap, AttributeType, AttributeValue, Product, ProductFilter, ProductType};
pub use requests::{AttributeRequirement, ProductSearchQuery};
pub use responses::{ApiResponse, ErrorResponse, HealthResponse, Hit, HitList};
