pub mod catalog;
pub mod chat;
pub mod commission;
pub mod config;
pub mod diagnosis;
pub mod events;
pub mod photo;
pub mod questionnaire;
pub mod recommend;
pub mod scoring;
pub mod telemetry;
pub mod tracking;

pub use catalog::{
    AffiliatePartner, PartnerRegistry, Product, ProductCatalog, ProductCategory, SkinConcern,
};
pub use commission::{
    calculate_commission, daily_projection, CommissionData, CommissionError, RevenueProjection,
};
pub use diagnosis::{
    complete_diagnosis, default_diagnosis, Diagnosis, FallbackReason, VisionDiagnosis,
};
pub use questionnaire::{AgeBracket, PrimaryConcern, QuestionnaireAnswers};
pub use recommend::{recommend, recommend_routine, RecommendationContext, RecommendationEngine};
pub use scoring::{compute_scores, estimate_skin_age, ScoreInput, SkinScores};

/// Deterministic id for one analysis request, stable across restarts.
pub fn scan_id(images: &[String], questionnaire: &QuestionnaireAnswers) -> String {
    let mut payload = String::new();
    for image in images {
        payload.push_str(image);
        payload.push('\n');
    }
    payload.push_str(questionnaire.age.label());
    if let Some(concern) = questionnaire.main_concern {
        payload.push_str(concern.label());
    }
    payload.push_str(&questionnaire.sensitivities.join(","));
    format!("scan_{:016x}", stable_hash64(&payload))
}

fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
