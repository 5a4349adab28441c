use serde::{Deserialize, Serialize};

use crate::recommend::ScoredProduct;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
    pub irrelevant_multiplier: f64,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            irrelevant_multiplier: 0.1,
        }
    }
}

/// Zeroes out-of-stock products and demotes products matching no concern.
/// Neither case is filtered out, so diagnostics still see them.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    config: RelevanceConfig,
}

impl RelevanceScorer {
    pub fn new(config: RelevanceConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, candidate: &mut ScoredProduct<'_>) {
        if !candidate.product.in_stock {
            candidate.score = 0.0;
        }

        if candidate.relevance_count == 0 {
            candidate.relevance_multiplier = self.config.irrelevant_multiplier;
            candidate.score *= self.config.irrelevant_multiplier;
        } else {
            candidate.relevance_multiplier = 1.0;
        }
    }
}
