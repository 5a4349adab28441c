use crate::catalog::{Product, SkinConcern};
use crate::recommend::context::{ConcernScores, RecommendationContext};

const POINTS_PER_WEIGHT: f64 = 10.0;

/// Concerns implied by five-point scores. Order is fixed and only used for display.
pub fn infer_concerns(scores: &ConcernScores) -> Vec<SkinConcern> {
    let mut concerns = Vec::new();
    if scores.hydration <= 2.0 {
        concerns.push(SkinConcern::Dryness);
    }
    if scores.sebum >= 4.0 {
        concerns.push(SkinConcern::Oiliness);
    }
    if scores.sebum >= 3.0 && scores.texture <= 3.0 {
        concerns.push(SkinConcern::Acne);
    }
    if scores.evenness <= 2.0 {
        concerns.push(SkinConcern::Pigmentation);
    }
    if scores.tolerance <= 2.0 {
        concerns.push(SkinConcern::Sensitivity);
    }
    if scores.texture <= 2.0 {
        concerns.push(SkinConcern::Pores);
    }
    concerns
}

/// Severity weight for a five-point level: the lower the level, the more urgent.
pub fn severity_weight(level: f64) -> f64 {
    if level <= 2.0 {
        1.0
    } else if level <= 3.0 {
        0.7
    } else {
        0.4
    }
}

pub fn concern_weight(concern: SkinConcern, context: &RecommendationContext) -> f64 {
    let scores = &context.scores;
    match concern {
        SkinConcern::Dryness => severity_weight(scores.hydration),
        SkinConcern::Oiliness => severity_weight(5.0 - scores.sebum),
        SkinConcern::Acne => {
            if scores.sebum > 3.0 {
                severity_weight(5.0 - scores.texture)
            } else {
                severity_weight(5.0)
            }
        }
        SkinConcern::Pigmentation => severity_weight(scores.evenness),
        SkinConcern::Sensitivity | SkinConcern::Redness => severity_weight(scores.tolerance),
        SkinConcern::Pores => severity_weight(scores.texture),
        SkinConcern::Aging => {
            if context.skin_age > 30 {
                1.0
            } else {
                0.3
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConcernScorer;

impl ConcernScorer {
    pub fn new() -> Self {
        Self
    }

    /// Returns the concern points and how many of the product's tags matched.
    pub fn score(
        &self,
        product: &Product,
        inferred: &[SkinConcern],
        context: &RecommendationContext,
    ) -> (f64, usize) {
        let mut points = 0.0;
        let mut matched = 0usize;
        for concern in &product.skin_concerns {
            if inferred.contains(concern) {
                points += concern_weight(*concern, context) * POINTS_PER_WEIGHT;
                matched += 1;
            }
        }
        (points, matched)
    }
}
