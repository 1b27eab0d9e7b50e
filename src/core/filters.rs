use crate::models::{Product, ProductFilter};

/// Build the candidate filter for a search
///
/// The attribute membership constraint is only applied when requirements
/// reference at least one attribute.
pub fn build_product_filter(
    search_text: &str,
    product_type_pid: &str,
    attribute_pids: &[String],
) -> ProductFilter {
    ProductFilter {
        name_contains: search_text.to_string(),
        product_type_pid: product_type_pid.to_string(),
        attribute_pids: attribute_pids.to_vec(),
    }
}

/// Check if a product satisfies the candidate filter
///
/// Stores that cannot express every constraint natively run their results
/// through this check.
#[inline]
pub fn matches_filter(product: &Product, filter: &ProductFilter) -> bool {
    // Soft-deleted products never match
    if product.deleted() {
        return false;
    }

    if product.product_type_pid != filter.product_type_pid {
        return false;
    }

    if !name_contains_ignore_case(&product.name, &filter.name_contains) {
        return false;
    }

    if !filter.attribute_pids.is_empty() && !has_any_attribute(product, &filter.attribute_pids) {
        return false;
    }

    true
}

/// Case-insensitive substring check
#[inline]
pub fn name_contains_ignore_case(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}

/// Check if the product carries at least one of the given attributes
#[inline]
pub fn has_any_attribute(product: &Product, attribute_pids: &[String]) -> bool {
    product
        .attribute_values
        .iter()
        .any(|av| attribute_pids.contains(&av.attribute_pid))
}
