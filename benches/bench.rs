// Criterion benchmarks for FTM Search

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ftm_search::core::{rank_products, statistics::number_attribute_means, SearchEngine, SearchLimits};
use ftm_search::models::{
    Attribute, AttributeData, AttributeMap, AttributeRequirement, AttributeType, AttributeValue, Product,
    ProductSearchQuery, ProductType,
};
use ftm_search::services::InMemoryStore;
use std::collections::HashMap;
use std::sync::Arc;

fn create_attributes() -> Vec<Attribute> {
    [
        ("weight", AttributeType::Number),
        ("size", AttributeType::Range),
        ("wireless", AttributeType::Boolean),
        ("color", AttributeType::Dropdown),
        ("brand", AttributeType::Text),
    ]
    .into_iter()
    .map(|(pid, attribute_type)| Attribute {
        pid: pid.to_string(),
        name: pid.to_string(),
        description: None,
        attribute_type,
    })
    .collect()
}

fn create_candidate(id: usize) -> Product {
    let colors = ["red", "blue", "green", "black"];
    let values = vec![
        ("weight", AttributeData::Number { num_value: (id % 50) as f64 }),
        (
            "size",
            AttributeData::Range {
                min_value: (id % 10) as f64,
                max_value: (10 + id % 20) as f64,
            },
        ),
        ("wireless", AttributeData::Boolean { value: id % 3 == 0 }),
        (
            "color",
            AttributeData::Dropdown {
                options: vec![colors[id % colors.len()].to_string()],
                value: None,
            },
        ),
        ("brand", AttributeData::Text { value: format!("brand-{}", id % 7) }),
    ];

    Product {
        pid: Some(id.to_string()),
        name: format!("Headset {}", id),
        description: String::new(),
        product_type_pid: "audio".to_string(),
        organization_pid: "org".to_string(),
        attribute_values: values
            .into_iter()
            .map(|(pid, value)| AttributeValue {
                attribute_pid: pid.to_string(),
                value,
                is_required: None,
            })
            .collect(),
        is_deleted: None,
        created_at: None,
    }
}

fn create_requirements() -> Vec<AttributeRequirement> {
    vec![
        ("weight", AttributeData::Number { num_value: 20.0 }),
        ("size", AttributeData::Range { min_value: 2.0, max_value: 25.0 }),
        ("wireless", AttributeData::Boolean { value: true }),
        (
            "color",
            AttributeData::Dropdown {
                options: vec!["black".to_string(), "blue".to_string()],
                value: None,
            },
        ),
        ("brand", AttributeData::Text { value: "brand-3".to_string() }),
    ]
    .into_iter()
    .map(|(pid, value)| AttributeRequirement {
        attribute_pid: pid.to_string(),
        value,
        is_required: None,
    })
    .collect()
}

fn attribute_map() -> AttributeMap {
    create_attributes().into_iter().map(|a| (a.pid.clone(), a)).collect()
}

fn bench_attribute_means(c: &mut Criterion) {
    let attributes = attribute_map();
    let candidates: Vec<Product> = (0..1000).map(create_candidate).collect();

    c.bench_function("number_attribute_means_1000", |b| {
        b.iter(|| number_attribute_means(black_box(&candidates), black_box(&attributes)));
    });
}

fn bench_rank_products(c: &mut Criterion) {
    let attributes = attribute_map();
    let requirements: HashMap<String, AttributeData> = create_requirements()
        .into_iter()
        .map(|r| (r.attribute_pid, r.value))
        .collect();

    let mut group = c.benchmark_group("rank_products");

    for size in [100, 1000, 10000].iter() {
        let candidates: Vec<Product> = (0..*size).map(create_candidate).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| rank_products(black_box(candidates.clone()), &requirements, &attributes));
        });
    }

    group.finish();
}

fn bench_search_products(c: &mut Criterion) {
    let store = InMemoryStore::with_data(
        vec![ProductType {
            pid: "audio".to_string(),
            name: "Audio".to_string(),
            description: String::new(),
            category_pid: None,
            is_deleted: None,
        }],
        create_attributes(),
        (0..1000).map(create_candidate).collect(),
    );
    let engine = SearchEngine::from_store(Arc::new(store), SearchLimits::default());
    let query = ProductSearchQuery {
        search_text: Some("headset".to_string()),
        product_type_pid: "audio".to_string(),
        requirements: create_requirements(),
        limit: Some(50),
        offset: 0,
    };

    c.bench_function("search_products_1000", |b| {
        b.iter(|| tokio_test::block_on(engine.search_products(black_box(&query))));
    });
}

criterion_group!(benches, bench_attribute_means, bench_rank_products, bench_search_products);
criterion_main!(benches);
