use serde::{Deserialize, Serialize};

use crate::catalog::{Product, SkinConcern};
use crate::recommend::context::RecommendationContext;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusWeights {
    pub aging_min_skin_age: i32,
    pub aging_bonus: f64,
    pub acne_max_skin_age: i32,
    pub acne_bonus: f64,
    pub rating_multiplier: f64,
    pub reviews_per_point: f64,
    pub review_bonus_cap: f64,
    pub recommended_bonus: f64,
    pub bestseller_bonus: f64,
}

impl Default for BonusWeights {
    fn default() -> Self {
        Self {
            aging_min_skin_age: 30,
            aging_bonus: 15.0,
            acne_max_skin_age: 25,
            acne_bonus: 10.0,
            rating_multiplier: 2.0,
            reviews_per_point: 100.0,
            review_bonus_cap: 10.0,
            recommended_bonus: 8.0,
            bestseller_bonus: 5.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BonusScorer {
    weights: BonusWeights,
}

impl BonusScorer {
    pub fn new(weights: BonusWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, product: &Product, context: &RecommendationContext) -> f64 {
        let mut score = 0.0;

        if context.skin_age > self.weights.aging_min_skin_age
            && product.has_concern(SkinConcern::Aging)
        {
            score += self.weights.aging_bonus;
        }
        if context.skin_age < self.weights.acne_max_skin_age
            && product.has_concern(SkinConcern::Acne)
        {
            score += self.weights.acne_bonus;
        }

        score += product.rating * self.weights.rating_multiplier;
        score += self.review_bonus(product.review_count);

        if product.is_recommended {
            score += self.weights.recommended_bonus;
        }
        if product.is_bestseller {
            score += self.weights.bestseller_bonus;
        }

        score
    }

    fn review_bonus(&self, review_count: u32) -> f64 {
        if self.weights.reviews_per_point <= 0.0 {
            return 0.0;
        }
        (review_count as f64 / self.weights.reviews_per_point).min(self.weights.review_bonus_cap)
    }
}
