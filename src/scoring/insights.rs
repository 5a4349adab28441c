use serde::{Deserialize, Serialize};

use crate::scoring::{ScoreField, SkinScores};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreLabel {
    Excellent,
    Good,
    Average,
    Weak,
}

impl ScoreLabel {
    pub fn label(self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "Excellent",
            ScoreLabel::Good => "Bon",
            ScoreLabel::Average => "Moyen",
            ScoreLabel::Weak => "Faible",
        }
    }
}

pub fn score_label(score: u8) -> ScoreLabel {
    if score >= 80 {
        ScoreLabel::Excellent
    } else if score >= 60 {
        ScoreLabel::Good
    } else if score >= 40 {
        ScoreLabel::Average
    } else {
        ScoreLabel::Weak
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInsights {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub priority: String,
}

pub fn score_insights(scores: &SkinScores) -> ScoreInsights {
    let mut sorted = scores.entries();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let strengths = sorted
        .iter()
        .filter(|(_, score)| *score >= 75)
        .take(2)
        .map(|(field, _)| strength_label(*field).to_string())
        .collect();

    let improvements = sorted
        .iter()
        .filter(|(_, score)| *score < 60)
        .take(2)
        .map(|(field, _)| improvement_label(*field).to_string())
        .collect();

    let (lowest, _) = sorted[sorted.len() - 1];

    ScoreInsights {
        strengths,
        improvements,
        priority: improvement_label(lowest).to_string(),
    }
}

fn strength_label(field: ScoreField) -> &'static str {
    match field {
        ScoreField::Hydration => "Excellente hydratation naturelle",
        ScoreField::Sebum => "Contrôle parfait du sébum",
        ScoreField::Texture => "Texture de peau remarquable",
        ScoreField::Tone => "Teint uniforme et lumineux",
        ScoreField::Tolerance => "Peau très tolérante",
    }
}

fn improvement_label(field: ScoreField) -> &'static str {
    match field {
        ScoreField::Hydration => "Renforcer l'hydratation quotidienne",
        ScoreField::Sebum => "Mieux contrôler la production de sébum",
        ScoreField::Texture => "Améliorer la texture et resserrer les pores",
        ScoreField::Tone => "Unifier le teint et réduire les taches",
        ScoreField::Tolerance => "Apaiser et renforcer la barrière cutanée",
    }
}
