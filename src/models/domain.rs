use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Number,
    Range,
    Text,
    Dropdown,
    Boolean,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Number => "number",
            AttributeType::Range => "range",
            AttributeType::Text => "text",
            AttributeType::Dropdown => "dropdown",
            AttributeType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute definition (e.g. "color" of type dropdown)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    pub pid: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
}

/// Concrete value carried by an attribute value or a requirement.
///
/// The JSON shapes are distinguished structurally, so variant order matters:
/// `options` marks a dropdown, and a plain `value` is tried as a boolean
/// before falling back to text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeData {
    Number {
        #[serde(rename = "numValue")]
        num_value: f64,
    },
    Range {
        #[serde(rename = "minValue")]
        min_value: f64,
        #[serde(rename = "maxValue")]
        max_value: f64,
    },
    Dropdown {
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Boolean {
        value: bool,
    },
    Text {
        value: String,
    },
}

impl AttributeData {
    /// The attribute type this value shape belongs to
    pub fn kind(&self) -> AttributeType {
        match self {
            AttributeData::Number { .. } => AttributeType::Number,
            AttributeData::Range { .. } => AttributeType::Range,
            AttributeData::Dropdown { .. } => AttributeType::Dropdown,
            AttributeData::Boolean { .. } => AttributeType::Boolean,
            AttributeData::Text { .. } => AttributeType::Text,
        }
    }

    /// Check the value's internal constraints.
    ///
    /// Ranges must satisfy `min < max`, and a dropdown's selected value must
    /// be one of its options.
    pub fn check_well_formed(&self) -> Result<(), String> {
        match self {
            AttributeData::Range { min_value, max_value } if min_value >= max_value => Err(format!(
                "minValue ({}) must be lower than maxValue ({})",
                min_value, max_value
            )),
            AttributeData::Dropdown { options, value: Some(value) } if !options.contains(value) => {
                Err(format!("value '{}' not found in options", value))
            }
            AttributeData::Number { num_value } if !num_value.is_finite() => {
                Err("numValue must be a finite number".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Value of one attribute on one product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(rename = "attributePid")]
    pub attribute_pid: String,
    pub value: AttributeData,
    #[serde(rename = "isRequired", default, skip_serializing_if = "Option::is_none")]
    pub is_required: Option<bool>,
}

/// Catalog product, the candidate of a search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub pid: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "productTypePid")]
    pub product_type_pid: String,
    #[serde(rename = "organizationPid")]
    pub organization_pid: String,
    #[serde(rename = "attributeValues", default)]
    pub attribute_values: Vec<AttributeValue>,
    #[serde(rename = "isDeleted", default, skip_serializing)]
    pub is_deleted: Option<bool>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Product {
    /// Helper to get is_deleted as a bool, defaulting to false
    pub fn deleted(&self) -> bool {
        self.is_deleted.unwrap_or(false)
    }
}

/// Product type (e.g. "Laptop"), used to scope a search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductType {
    pub pid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "categoryPid", default)]
    pub category_pid: Option<String>,
    #[serde(rename = "isDeleted", default, skip_serializing)]
    pub is_deleted: Option<bool>,
}

impl ProductType {
    pub fn deleted(&self) -> bool {
        self.is_deleted.unwrap_or(false)
    }
}

/// Attribute definitions keyed by attribute pid
pub type AttributeMap = HashMap<String, Attribute>;

/// Candidate product filter
#[derive(Debug, Clone)]
pub struct ProductFilter {
    /// Case-insensitive substring the product name must contain
    pub name_contains: String,
    pub product_type_pid: String,
    /// When non-empty, products must carry at least one of these attributes
    pub attribute_pids: Vec<String>,
}
