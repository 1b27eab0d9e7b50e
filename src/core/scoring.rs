use std::collections::HashMap;

use crate::models::{AttributeData, AttributeMap, AttributeType, Product};

/// Score for an exact attribute match
pub const EXACT_MATCH_SCORE: f64 = 1.0;

/// Score for a contradicting attribute value
pub const MISMATCH_SCORE: f64 = -1.0;

/// Calculate a relevance score for a product against the requested attributes
///
/// Every attribute value whose attribute is requested contributes according
/// to its type:
///
/// | type     | contribution                                                    |
/// |----------|-----------------------------------------------------------------|
/// | range    | +1 exact, inverse gaps when strictly nested, -1 otherwise       |
/// | number   | +1 exact, otherwise `1 / |value - mean|` when the mean is known |
/// | boolean  | +1 equal, -1 otherwise                                          |
/// | dropdown | +1 when the option sets overlap, -1 otherwise                   |
/// | text     | +1 equal, 0 otherwise                                           |
///
/// Values for attributes that were not requested contribute nothing. The
/// score is unbounded and only meaningful relative to other candidates.
pub fn calculate_product_score(
    product: &Product,
    requirements: &HashMap<String, AttributeData>,
    attributes: &AttributeMap,
    means: &HashMap<String, f64>,
) -> f64 {
    let mut score = 0.0;

    for av in &product.attribute_values {
        let Some(required) = requirements.get(&av.attribute_pid) else {
            continue;
        };
        let Some(attribute) = attributes.get(&av.attribute_pid) else {
            continue;
        };

        let mean = means.get(&av.attribute_pid).copied();
        match score_attribute(attribute.attribute_type, required, &av.value, mean) {
            Some(contribution) => score += contribution,
            None => {
                tracing::warn!(
                    "Product {:?} stores a {} value for {} attribute {}, ignoring it",
                    product.pid,
                    av.value.kind(),
                    attribute.attribute_type,
                    av.attribute_pid
                );
            }
        }
    }

    score
}

/// Score one attribute value against the requested value
///
/// Returns `None` when either value does not have the shape of the
/// attribute's declared type.
pub fn score_attribute(
    attribute_type: AttributeType,
    required: &AttributeData,
    value: &AttributeData,
    mean: Option<f64>,
) -> Option<f64> {
    match attribute_type {
        AttributeType::Range => match (required, value) {
            (
                AttributeData::Range { min_value: req_min, max_value: req_max },
                AttributeData::Range { min_value, max_value },
            ) => Some(score_range(*req_min, *req_max, *min_value, *max_value)),
            _ => None,
        },
        AttributeType::Number => match (required, value) {
            (AttributeData::Number { num_value: required }, AttributeData::Number { num_value }) => {
                Some(score_number(*required, *num_value, mean))
            }
            _ => None,
        },
        AttributeType::Boolean => match (required, value) {
            (AttributeData::Boolean { value: required }, AttributeData::Boolean { value }) => {
                Some(score_boolean(*required, *value))
            }
            _ => None,
        },
        AttributeType::Dropdown => match (required, value) {
            (AttributeData::Dropdown { options: required, .. }, AttributeData::Dropdown { options, .. }) => {
                Some(score_dropdown(required, options))
            }
            _ => None,
        },
        AttributeType::Text => match (required, value) {
            (AttributeData::Text { value: required }, AttributeData::Text { value }) => {
                Some(score_text(required, value))
            }
            _ => None,
        },
    }
}

/// Calculate range score
///
/// Strictly nested ranges earn the inverse of each boundary gap, so tighter
/// nesting scores higher. Strict nesting keeps every gap non-zero.
#[inline]
fn score_range(req_min: f64, req_max: f64, min: f64, max: f64) -> f64 {
    if req_min == min && req_max == max {
        return EXACT_MATCH_SCORE;
    }

    // Requested range strictly contains the product range
    if req_min < min && max < req_max {
        return 1.0 / (min - req_min) + 1.0 / (req_max - max);
    }

    // Product range strictly contains the requested range
    if min < req_min && req_max < max {
        return 1.0 / (max - req_max) + 1.0 / (req_min - min);
    }

    MISMATCH_SCORE
}

/// Calculate number score
///
/// Non-exact values score by inverse distance from the attribute's mean
/// over the candidate set. No score without a usable mean.
#[inline]
fn score_number(required: f64, value: f64, mean: Option<f64>) -> f64 {
    if required == value {
        return EXACT_MATCH_SCORE;
    }

    match mean {
        Some(mean) if mean != 0.0 => {
            let distance = (value - mean).abs();
            if distance > 0.0 {
                1.0 / distance
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

#[inline]
fn score_boolean(required: bool, value: bool) -> f64 {
    if required == value {
        EXACT_MATCH_SCORE
    } else {
        MISMATCH_SCORE
    }
}

#[inline]
fn score_dropdown(required: &[String], options: &[String]) -> f64 {
    if options.iter().any(|option| required.contains(option)) {
        EXACT_MATCH_SCORE
    } else {
        MISMATCH_SCORE
    }
}

// Exact equality only, no partial credit
#[inline]
fn score_text(required: &str, value: &str) -> f64 {
    if required == value {
        EXACT_MATCH_SCORE
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, AttributeValue};

    fn dropdown(options: &[&str]) -> AttributeData {
        AttributeData::Dropdown {
            options: options.iter().map(|o| o.to_string()).collect(),
            value: None,
        }
    }

    fn range(min_value: f64, max_value: f64) -> AttributeData {
        AttributeData::Range { min_value, max_value }
    }

    #[test]
    fn test_range_exact_match() {
        assert_eq!(score_range(4.0, 20.0, 4.0, 20.0), 1.0);
    }

    #[test]
    fn test_range_requirement_contains_product() {
        // 1/(6-4) + 1/(20-16)
        let score = score_range(4.0, 20.0, 6.0, 16.0);
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_range_product_contains_requirement() {
        // 1/(30-20) + 1/(4-2)
        let score = score_range(4.0, 20.0, 2.0, 30.0);
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_range_shared_boundary_is_not_nested() {
        assert_eq!(score_range(4.0, 20.0, 4.0, 10.0), -1.0);
        assert_eq!(score_range(4.0, 20.0, 10.0, 20.0), -1.0);
        assert_eq!(score_range(4.0, 20.0, 4.0, 30.0), -1.0);
        assert_eq!(score_range(4.0, 20.0, 2.0, 20.0), -1.0);
    }

    #[test]
    fn test_range_partial_overlap_penalized() {
        assert_eq!(score_range(4.0, 20.0, 10.0, 30.0), -1.0);
        assert_eq!(score_range(4.0, 20.0, 25.0, 30.0), -1.0);
    }

    #[test]
    fn test_number_exact_match() {
        assert_eq!(score_number(10.0, 10.0, Some(10.0)), 1.0);
        assert_eq!(score_number(10.0, 10.0, None), 1.0);
    }

    #[test]
    fn test_number_distance_from_mean() {
        assert!((score_number(10.0, 15.0, Some(10.0)) - 0.2).abs() < 1e-9);
        assert!((score_number(10.0, 5.0, Some(10.0)) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_number_without_usable_mean() {
        assert_eq!(score_number(10.0, 15.0, None), 0.0);
        assert_eq!(score_number(10.0, 15.0, Some(0.0)), 0.0);
        assert_eq!(score_number(10.0, 15.0, Some(15.0)), 0.0);
    }

    #[test]
    fn test_boolean_score() {
        assert_eq!(score_boolean(true, true), 1.0);
        assert_eq!(score_boolean(true, false), -1.0);
    }

    #[test]
    fn test_dropdown_overlap() {
        let required = dropdown(&["red", "blue"]);
        let overlapping = dropdown(&["blue", "green"]);
        let disjoint = dropdown(&["green"]);

        assert_eq!(score_attribute(AttributeType::Dropdown, &required, &overlapping, None), Some(1.0));
        assert_eq!(score_attribute(AttributeType::Dropdown, &required, &disjoint, None), Some(-1.0));
    }

    #[test]
    fn test_text_exact_only() {
        assert_eq!(score_text("steel", "steel"), 1.0);
        assert_eq!(score_text("steel", "Steel"), 0.0);
    }

    #[test]
    fn test_shape_mismatch_yields_none() {
        let required = range(1.0, 2.0);
        let value = AttributeData::Number { num_value: 1.5 };

        assert_eq!(score_attribute(AttributeType::Range, &required, &value, None), None);
    }

    #[test]
    fn test_product_score_sums_requested_attributes() {
        let attributes: AttributeMap = [
            ("wifi", AttributeType::Boolean),
            ("color", AttributeType::Dropdown),
            ("notes", AttributeType::Text),
        ]
        .into_iter()
        .map(|(pid, attribute_type)| {
            (
                pid.to_string(),
                Attribute {
                    pid: pid.to_string(),
                    name: pid.to_string(),
                    description: None,
                    attribute_type,
                },
            )
        })
        .collect();

        let requirements: HashMap<String, AttributeData> = [
            ("wifi".to_string(), AttributeData::Boolean { value: true }),
            ("color".to_string(), dropdown(&["red"])),
        ]
        .into_iter()
        .collect();

        let product = Product {
            pid: Some("p1".to_string()),
            name: "Router".to_string(),
            description: String::new(),
            product_type_pid: "network".to_string(),
            organization_pid: "org".to_string(),
            attribute_values: vec![
                AttributeValue {
                    attribute_pid: "wifi".to_string(),
                    value: AttributeData::Boolean { value: true },
                    is_required: None,
                },
                AttributeValue {
                    attribute_pid: "color".to_string(),
                    value: dropdown(&["black"]),
                    is_required: None,
                },
                // Not requested, contributes nothing
                AttributeValue {
                    attribute_pid: "notes".to_string(),
                    value: AttributeData::Text { value: "fast".to_string() },
                    is_required: None,
                },
            ],
            is_deleted: None,
            created_at: None,
        };

        let score = calculate_product_score(&product, &requirements, &attributes, &HashMap::new());
        assert_eq!(score, 0.0);
    }
}
