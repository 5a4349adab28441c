use serde::{Deserialize, Deserializer, Serialize};

use crate::questionnaire::{PrimaryConcern, QuestionnaireAnswers};
use crate::recommend::RecommendationContext;
use crate::scoring::{
    clamp_skin_age, compute_scores, estimate_skin_age, score_insights, ScoreInput, ScoreInsights,
    SkinScores,
};

/// Bumped whenever the fallback content below changes.
pub const DEFAULT_DIAGNOSIS_VERSION: u32 = 1;
pub const DEFAULT_VISION_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutineStep {
    pub step: String,
    pub product: String,
    pub action: String,
    pub duration: String,
    pub tips: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutinePhase {
    pub steps: Vec<RoutineStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutineFrequency {
    pub daily: String,
    pub weekly: String,
    pub monthly: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkincareRoutine {
    pub title: String,
    pub morning: RoutinePhase,
    pub evening: RoutinePhase,
    pub frequency: RoutineFrequency,
}

/// Product suggested by the vision model. Prices are display strings ("12.99€").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestedProduct {
    pub name: String,
    pub brand: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    pub link: String,
    pub category: String,
    pub image: String,
    pub benefits: String,
    pub application: String,
    pub frequency: String,
}

/// Raw diagnosis as parsed from the vision model; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisionDiagnosis {
    pub skin_type: Option<String>,
    pub skin_type_explanation: Option<String>,
    pub concerns: Vec<String>,
    pub products: Vec<SuggestedProduct>,
    pub routine: Option<SkincareRoutine>,
    pub scores: Option<SkinScores>,
    #[serde(deserialize_with = "rounded_age")]
    pub skin_age: Option<i32>,
    pub confidence: Option<f64>,
}

fn rounded_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|age| age.is_finite())
        .map(|age| age.round().clamp(0.0, 150.0) as i32))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The model answered but without a skin type.
    IncompleteAnalysis,
    /// The model call or its JSON parse failed.
    AnalysisFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackInfo {
    pub reason: FallbackReason,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub skin_type: String,
    pub skin_type_explanation: String,
    pub concerns: Vec<String>,
    pub products: Vec<SuggestedProduct>,
    pub routine: SkincareRoutine,
    pub scores: SkinScores,
    pub skin_age: i32,
    pub confidence: f64,
    pub insights: ScoreInsights,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackInfo>,
}

impl Diagnosis {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn recommendation_context(&self) -> RecommendationContext {
        RecommendationContext::from_parts(
            Some(&self.scores),
            Some(self.skin_age),
            Some(&self.skin_type),
            self.concerns.clone(),
        )
    }
}

/// Fills the gaps of a vision reply, or replaces it when it is unusable.
pub fn complete_diagnosis(
    vision: Option<VisionDiagnosis>,
    questionnaire: &QuestionnaireAnswers,
) -> Diagnosis {
    let Some(vision) = vision else {
        return default_diagnosis(questionnaire, FallbackReason::AnalysisFailed);
    };
    let skin_type = match vision.skin_type.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => return default_diagnosis(questionnaire, FallbackReason::IncompleteAnalysis),
    };

    let confidence = vision
        .confidence
        .filter(|value| value.is_finite())
        .unwrap_or(DEFAULT_VISION_CONFIDENCE)
        .clamp(0.0, 1.0);
    let scores = vision.scores.unwrap_or_else(|| {
        compute_scores(&score_input(
            questionnaire,
            vision.concerns.clone(),
            questionnaire.main_concern,
            questionnaire.is_conservative(),
            confidence,
        ))
    });
    let skin_age = match vision.skin_age {
        Some(age) => clamp_skin_age(age, questionnaire.age),
        None => estimate_skin_age(&scores, questionnaire.age, confidence),
    };

    Diagnosis {
        skin_type,
        skin_type_explanation: vision.skin_type_explanation.unwrap_or_default(),
        concerns: vision.concerns,
        products: vision.products,
        routine: vision.routine.unwrap_or_default(),
        scores,
        skin_age,
        confidence,
        insights: score_insights(&scores),
        fallback: None,
    }
}

/// The single source of fallback diagnoses.
pub fn default_diagnosis(questionnaire: &QuestionnaireAnswers, reason: FallbackReason) -> Diagnosis {
    let (confidence, observations, conservative, main_concern) = match reason {
        FallbackReason::IncompleteAnalysis => (
            0.7,
            vec![
                "Zone T légèrement grasse".to_string(),
                "Pores visibles".to_string(),
            ],
            questionnaire.is_conservative(),
            questionnaire.main_concern,
        ),
        FallbackReason::AnalysisFailed => (
            0.5,
            vec!["Analyse en cours".to_string()],
            true,
            questionnaire
                .main_concern
                .or(Some(PrimaryConcern::EnlargedPores)),
        ),
    };

    let scores = compute_scores(&score_input(
        questionnaire,
        observations.clone(),
        main_concern,
        conservative,
        confidence,
    ));
    let skin_age = estimate_skin_age(&scores, questionnaire.age, confidence);

    let (skin_type, explanation, concerns) = match reason {
        FallbackReason::IncompleteAnalysis => (
            "Peau Mixte avec Besoins Spécifiques",
            "Votre peau présente une zone T (front, nez, menton) plus grasse que les joues. \
             L'analyse photo n'a pas permis un diagnostic plus précis.",
            vec![
                "Zone T légèrement grasse".to_string(),
                "Joues normales à sèches".to_string(),
                "Pores visibles zone médiane".to_string(),
            ],
        ),
        FallbackReason::AnalysisFailed => (
            "Diagnostic Temporaire",
            "L'analyse photo est momentanément indisponible. \
             Ce diagnostic provisoire s'appuie uniquement sur vos réponses.",
            observations,
        ),
    };

    Diagnosis {
        skin_type: skin_type.to_string(),
        skin_type_explanation: explanation.to_string(),
        concerns,
        products: vec![default_product()],
        routine: default_routine(),
        scores,
        skin_age,
        confidence,
        insights: score_insights(&scores),
        fallback: Some(FallbackInfo {
            reason,
            version: DEFAULT_DIAGNOSIS_VERSION,
        }),
    }
}

fn score_input(
    questionnaire: &QuestionnaireAnswers,
    concerns: Vec<String>,
    primary_concern: Option<PrimaryConcern>,
    is_conservative: bool,
    confidence: f64,
) -> ScoreInput {
    ScoreInput {
        concerns,
        primary_concern,
        age: questionnaire.age,
        sensitivities: questionnaire.sensitivities.clone(),
        is_conservative,
        confidence,
    }
}

fn default_product() -> SuggestedProduct {
    SuggestedProduct {
        name: "Gel Nettoyant Moussant".to_string(),
        brand: "CeraVe".to_string(),
        price: "12.99€".to_string(),
        original_price: Some("15.99€".to_string()),
        discount: Some("19%".to_string()),
        link: "https://amzn.to/cerave-gel".to_string(),
        category: "Nettoyant Purifiant".to_string(),
        image: "https://m.media-amazon.com/images/I/41vCLcQ7B0L._UF350,350_QL80_.jpg".to_string(),
        benefits: "Élimine l'excès de sébum sans dessécher".to_string(),
        application: "Masser 30 secondes sur peau humide".to_string(),
        frequency: "Matin et soir".to_string(),
    }
}

fn default_routine() -> SkincareRoutine {
    let step = |product: &str, action: &str, duration: &str, tips: &str| RoutineStep {
        step: "1".to_string(),
        product: product.to_string(),
        action: action.to_string(),
        duration: duration.to_string(),
        tips: tips.to_string(),
    };

    SkincareRoutine {
        title: "Routine Personnalisée - Peau Mixte Équilibrée".to_string(),
        morning: RoutinePhase {
            steps: vec![step(
                "Gel Nettoyant CeraVe",
                "Masser délicatement 30 secondes en mouvements circulaires",
                "30 secondes",
                "Insister sur la zone T, plus doux sur les joues",
            )],
        },
        evening: RoutinePhase {
            steps: vec![step(
                "Gel Nettoyant CeraVe",
                "Double nettoyage si maquillage/protection solaire",
                "1 minute",
                "Rincer à l'eau tiède, jamais chaude",
            )],
        },
        frequency: RoutineFrequency {
            daily: "Nettoyant, hydratant, protection solaire".to_string(),
            weekly: "Gommage doux zone T uniquement".to_string(),
            monthly: "Masque purifiant si nécessaire".to_string(),
        },
    }
}
