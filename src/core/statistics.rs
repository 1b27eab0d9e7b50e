use std::collections::HashMap;

use crate::models::{AttributeData, AttributeMap, AttributeType, Product};

/// Calculate the mean value of every `number` attribute across a candidate set
///
/// Values are accumulated in candidate order, so the result is the same for
/// the same input. Attributes with no numeric observations are absent from
/// the returned map.
pub fn number_attribute_means(products: &[Product], attributes: &AttributeMap) -> HashMap<String, f64> {
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();

    for product in products {
        for av in &product.attribute_values {
            let is_number = attributes
                .get(&av.attribute_pid)
                .map(|a| a.attribute_type == AttributeType::Number)
                .unwrap_or(false);
            if !is_number {
                continue;
            }

            if let AttributeData::Number { num_value } = av.value {
                let entry = sums.entry(av.attribute_pid.as_str()).or_insert((0.0, 0));
                entry.0 += num_value;
                entry.1 += 1;
            }
        }
    }

    sums.into_iter()
        .map(|(pid, (sum, count))| (pid.to_string(), sum / count as f64))
        .collect()
}
