pub mod bonus;
pub mod concern;
pub mod context;
pub mod pipeline;
pub mod relevance;
pub mod routine;

pub use bonus::{BonusScorer, BonusWeights};
pub use concern::{concern_weight, infer_concerns, severity_weight, ConcernScorer};
pub use context::{to_five_point, ConcernScores, RecommendationContext};
pub use pipeline::{RecommendationPipeline, ScoredProduct};
pub use relevance::{RelevanceConfig, RelevanceScorer};
pub use routine::{split_routine, RoutineRecommendation};

use crate::catalog::{Product, ProductCatalog, ProductCategory};
use crate::config::RecommendationConfig;

pub const DEFAULT_LIMIT: usize = 6;

/// Stateless ranking front-end; every call recomputes from its inputs.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    pipeline: RecommendationPipeline,
    routine_pool: usize,
    routine_bucket_size: usize,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::from_config(&RecommendationConfig::default())
    }
}

impl RecommendationEngine {
    pub fn from_config(config: &RecommendationConfig) -> Self {
        let pipeline = RecommendationPipeline::new(
            ConcernScorer::new(),
            BonusScorer::new(config.bonus.clone()),
            RelevanceScorer::new(config.relevance.clone()),
        );
        Self {
            pipeline,
            routine_pool: config.routine_pool,
            routine_bucket_size: config.routine_bucket_size,
        }
    }

    pub fn rank<'a>(
        &self,
        context: &RecommendationContext,
        catalog: &'a ProductCatalog,
        category: Option<ProductCategory>,
    ) -> Vec<ScoredProduct<'a>> {
        self.pipeline.rank(context, catalog.products(), category)
    }

    pub fn recommend(
        &self,
        context: &RecommendationContext,
        catalog: &ProductCatalog,
        category: Option<ProductCategory>,
        limit: usize,
    ) -> Vec<Product> {
        self.rank(context, catalog, category)
            .into_iter()
            .take(limit)
            .map(|scored| scored.product.clone())
            .collect()
    }

    pub fn routine(
        &self,
        context: &RecommendationContext,
        catalog: &ProductCatalog,
    ) -> RoutineRecommendation {
        let ranked: Vec<&Product> = self
            .rank(context, catalog, None)
            .into_iter()
            .take(self.routine_pool)
            .map(|scored| scored.product)
            .collect();
        split_routine(&ranked, self.routine_bucket_size)
    }
}

pub fn recommend(
    context: &RecommendationContext,
    catalog: &ProductCatalog,
    category: Option<ProductCategory>,
    limit: usize,
) -> Vec<Product> {
    RecommendationEngine::default().recommend(context, catalog, category, limit)
}

pub fn recommend_routine(
    context: &RecommendationContext,
    catalog: &ProductCatalog,
) -> RoutineRecommendation {
    RecommendationEngine::default().routine(context, catalog)
}
