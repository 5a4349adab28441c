use serde::Serialize;
use std::cmp::Ordering;

use crate::catalog::{Product, ProductCategory};
use crate::recommend::concern::infer_concerns;
use crate::recommend::{BonusScorer, ConcernScorer, RecommendationContext, RelevanceScorer};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProduct<'a> {
    pub product: &'a Product,
    pub concern_score: f64,
    pub bonus_score: f64,
    pub relevance_count: usize,
    pub relevance_multiplier: f64,
    pub score: f64,
}

impl<'a> ScoredProduct<'a> {
    pub fn new(product: &'a Product) -> Self {
        Self {
            product,
            concern_score: 0.0,
            bonus_score: 0.0,
            relevance_count: 0,
            relevance_multiplier: 1.0,
            score: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationPipeline {
    concern_scorer: ConcernScorer,
    bonus_scorer: BonusScorer,
    relevance_scorer: RelevanceScorer,
}

impl RecommendationPipeline {
    pub fn new(
        concern_scorer: ConcernScorer,
        bonus_scorer: BonusScorer,
        relevance_scorer: RelevanceScorer,
    ) -> Self {
        Self {
            concern_scorer,
            bonus_scorer,
            relevance_scorer,
        }
    }

    /// Scores every candidate and returns them best first. Equal scores keep
    /// catalog order.
    pub fn rank<'a>(
        &self,
        context: &RecommendationContext,
        products: &'a [Product],
        category: Option<ProductCategory>,
    ) -> Vec<ScoredProduct<'a>> {
        let inferred = infer_concerns(&context.scores);

        let mut candidates: Vec<ScoredProduct<'a>> = products
            .iter()
            .filter(|product| category.map_or(true, |category| product.category == category))
            .map(ScoredProduct::new)
            .collect();

        for candidate in candidates.iter_mut() {
            let (concern_score, relevance_count) =
                self.concern_scorer
                    .score(candidate.product, &inferred, context);
            candidate.concern_score = concern_score;
            candidate.relevance_count = relevance_count;
            candidate.bonus_score = self.bonus_scorer.score(candidate.product, context);
            candidate.score = concern_score + candidate.bonus_score;
            self.relevance_scorer.score(candidate);
        }

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        candidates
    }
}
