pub mod engine;
pub mod insights;
pub mod rules;
pub mod skin_age;

use serde::{Deserialize, Deserializer, Serialize};

pub use engine::{compute_scores, ScoreInput};
pub use insights::{score_insights, score_label, ScoreInsights, ScoreLabel};
pub use rules::{KeywordRule, ScoreDelta, KEYWORD_RULES};
pub use skin_age::{clamp_skin_age, estimate_skin_age};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreField {
    Hydration,
    Sebum,
    Texture,
    Tone,
    Tolerance,
}

impl ScoreField {
    pub const ALL: [ScoreField; 5] = [
        ScoreField::Hydration,
        ScoreField::Sebum,
        ScoreField::Texture,
        ScoreField::Tone,
        ScoreField::Tolerance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScoreField::Hydration => "Hydratation",
            ScoreField::Sebum => "Sébum",
            ScoreField::Texture => "Texture",
            ScoreField::Tone => "Uniformité",
            ScoreField::Tolerance => "Tolérance",
        }
    }
}

/// Five skin-health scores, each an integer in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinScores {
    #[serde(deserialize_with = "score_from_number")]
    pub hydration: u8,
    #[serde(deserialize_with = "score_from_number")]
    pub sebum: u8,
    #[serde(deserialize_with = "score_from_number")]
    pub texture: u8,
    #[serde(deserialize_with = "score_from_number")]
    pub tone: u8,
    #[serde(deserialize_with = "score_from_number")]
    pub tolerance: u8,
}

impl SkinScores {
    pub fn get(&self, field: ScoreField) -> u8 {
        match field {
            ScoreField::Hydration => self.hydration,
            ScoreField::Sebum => self.sebum,
            ScoreField::Texture => self.texture,
            ScoreField::Tone => self.tone,
            ScoreField::Tolerance => self.tolerance,
        }
    }

    pub fn entries(&self) -> [(ScoreField, u8); 5] {
        ScoreField::ALL.map(|field| (field, self.get(field)))
    }

    pub fn mean(&self) -> f64 {
        let total: u32 = self.entries().iter().map(|(_, score)| *score as u32).sum();
        total as f64 / 5.0
    }
}

/// Accepts any JSON number; fractions are rounded and the result clamped to `[0, 100]`.
fn score_from_number<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(engine::to_score(value))
}
