use serde::{Deserialize, Serialize};

use crate::scoring::SkinScores;

pub const DEFAULT_SKIN_AGE: i32 = 25;
pub const DEFAULT_SKIN_TYPE: &str = "mixte";

/// Scores on the 1-5 scale the concern thresholds are written against.
///
/// Build them from engine output with [`ConcernScores::from_skin_scores`];
/// feeding raw 0-100 values here would make every threshold misfire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcernScores {
    pub hydration: f64,
    pub sebum: f64,
    pub texture: f64,
    pub evenness: f64,
    pub tolerance: f64,
}

impl Default for ConcernScores {
    fn default() -> Self {
        Self::neutral()
    }
}

impl ConcernScores {
    pub fn neutral() -> Self {
        Self {
            hydration: 3.0,
            sebum: 3.0,
            texture: 3.0,
            evenness: 3.0,
            tolerance: 3.0,
        }
    }

    /// The sebum score rises as skin gets less oily, while the sebum level
    /// rises with oiliness, so that one is inverted.
    pub fn from_skin_scores(scores: &SkinScores) -> Self {
        Self {
            hydration: to_five_point(scores.hydration),
            sebum: to_five_point(100 - scores.sebum.min(100)),
            texture: to_five_point(scores.texture),
            evenness: to_five_point(scores.tone),
            tolerance: to_five_point(scores.tolerance),
        }
    }
}

/// Maps 0 to 1, 50 to 3 and 100 to 5, rounding to the nearest level.
pub fn to_five_point(score: u8) -> f64 {
    let score = score.min(100) as f64;
    (1.0 + score * 4.0 / 100.0).round()
}

/// Built per request and dropped once the ranking is returned.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationContext {
    pub scores: ConcernScores,
    pub skin_age: i32,
    pub skin_type: String,
    pub declared_concerns: Vec<String>,
}

impl Default for RecommendationContext {
    fn default() -> Self {
        Self {
            scores: ConcernScores::neutral(),
            skin_age: DEFAULT_SKIN_AGE,
            skin_type: DEFAULT_SKIN_TYPE.to_string(),
            declared_concerns: Vec::new(),
        }
    }
}

impl RecommendationContext {
    /// Any missing piece of a diagnosis is replaced by the neutral default.
    pub fn from_parts(
        scores: Option<&SkinScores>,
        skin_age: Option<i32>,
        skin_type: Option<&str>,
        declared_concerns: Vec<String>,
    ) -> Self {
        Self {
            scores: scores
                .map(ConcernScores::from_skin_scores)
                .unwrap_or_else(ConcernScores::neutral),
            skin_age: skin_age.unwrap_or(DEFAULT_SKIN_AGE),
            skin_type: skin_type
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(DEFAULT_SKIN_TYPE)
                .to_string(),
            declared_concerns,
        }
    }
}
