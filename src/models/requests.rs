use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::AttributeData;

/// Desired value for one attribute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeRequirement {
    #[serde(alias = "attribute_pid", rename = "attributePid")]
    pub attribute_pid: String,
    pub value: AttributeData,
    #[serde(alias = "is_required", rename = "isRequired", default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
}

/// Request to search and rank products
///
/// `searchText` is not validated here: an empty query is reported by the
/// engine as an invalid query, with the domain error code.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductSearchQuery {
    #[serde(alias = "search_text", rename = "searchText", default)]
    pub search_text: Option<String>,
    #[validate(length(min = 1))]
    #[serde(alias = "product_type_pid", rename = "productTypePid")]
    pub product_type_pid: String,
    #[serde(default)]
    pub requirements: Vec<AttributeRequirement>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}
