use serde::Serialize;

use crate::catalog::{Product, ProductCategory};

const MORNING_CATEGORIES: [ProductCategory; 4] = [
    ProductCategory::Cleanser,
    ProductCategory::Moisturizer,
    ProductCategory::Sunscreen,
    ProductCategory::Serum,
];

const EVENING_CATEGORIES: [ProductCategory; 4] = [
    ProductCategory::Cleanser,
    ProductCategory::Moisturizer,
    ProductCategory::Serum,
    ProductCategory::Treatment,
];

/// Photosensitising actives kept out of the morning routine.
const NIGHT_ONLY_ACTIVES: [&str; 3] = ["retinol", "aha", "bha"];

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoutineRecommendation {
    pub morning: Vec<Product>,
    pub evening: Vec<Product>,
}

/// Buckets are filtered independently from the same ranking, so a product
/// can land in both.
pub fn split_routine(ranked: &[&Product], bucket_size: usize) -> RoutineRecommendation {
    let morning = ranked
        .iter()
        .filter(|product| MORNING_CATEGORIES.contains(&product.category))
        .filter(|product| {
            !NIGHT_ONLY_ACTIVES
                .iter()
                .any(|active| product.has_ingredient_like(active))
        })
        .take(bucket_size)
        .map(|product| (*product).clone())
        .collect();

    let evening = ranked
        .iter()
        .filter(|product| EVENING_CATEGORIES.contains(&product.category))
        .take(bucket_size)
        .map(|product| (*product).clone())
        .collect();

    RoutineRecommendation { morning, evening }
}
