use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skin_advisor::commission::{CommissionData, RevenueProjection, DEFAULT_AVG_COMMISSION_RATE};
use skin_advisor::questionnaire::{BudgetBracket, RoutineComplexity};
use skin_advisor::recommend::RoutineRecommendation;
use skin_advisor::tracking::{AnalyticsEvent, EventType};
use skin_advisor::{
    AgeBracket, Diagnosis, PrimaryConcern, Product, QuestionnaireAnswers, RecommendationContext,
    VisionDiagnosis,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionnaireRequest {
    pub age: String,
    pub sensitivities: Vec<String>,
    pub current_routine: String,
    pub main_concern: String,
    pub budget: String,
    pub routine_complexity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

impl QuestionnaireRequest {
    pub fn to_answers(&self) -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            age: AgeBracket::parse_or_default(&self.age),
            sensitivities: self
                .sensitivities
                .iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect(),
            current_routine: self.current_routine.trim().to_string(),
            main_concern: PrimaryConcern::from_str(&self.main_concern),
            budget: BudgetBracket::from_str(&self.budget),
            routine_complexity: RoutineComplexity::from_str(&self.routine_complexity),
            free_text: self
                .free_text
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSkinRequest {
    #[serde(default)]
    pub images: Vec<String>,
    pub image: Option<String>,
    pub questionnaire: Option<QuestionnaireRequest>,
    pub request_id: Option<String>,
}

impl AnalyzeSkinRequest {
    /// Accepts both the multi-photo `images` list and the legacy single `image`.
    pub fn into_parts(self) -> Result<(Vec<String>, QuestionnaireRequest, Option<String>), String> {
        let mut images: Vec<String> = self
            .images
            .into_iter()
            .filter(|image| !image.trim().is_empty())
            .collect();
        if let Some(image) = self.image.filter(|image| !image.trim().is_empty()) {
            images.push(image);
        }
        if images.is_empty() {
            return Err("Image et questionnaire requis".to_string());
        }
        let questionnaire = self
            .questionnaire
            .ok_or_else(|| "Image et questionnaire requis".to_string())?;
        Ok((images, questionnaire, self.request_id))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSkinResponse {
    pub scan_id: String,
    pub request_id: String,
    pub analysis: Diagnosis,
    pub questionnaire: QuestionnaireRequest,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAnalysisRequest {
    #[serde(default)]
    pub message: String,
    pub analysis: Option<VisionDiagnosis>,
}

#[derive(Debug, Serialize)]
pub struct ChatAnalysisResponse {
    pub response: String,
}

/// Builds the ranking context from whatever analysis the client sent back.
pub fn context_from_analysis(analysis: Option<&VisionDiagnosis>) -> RecommendationContext {
    match analysis {
        Some(analysis) => RecommendationContext::from_parts(
            analysis.scores.as_ref(),
            analysis.skin_age,
            analysis.skin_type.as_deref(),
            analysis.concerns.clone(),
        ),
        None => RecommendationContext::default(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
    pub concern: Option<String>,
    pub limit: Option<usize>,
    pub analysis: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationKind {
    General,
    Category,
    Routine,
}

impl RecommendationKind {
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "routine" => RecommendationKind::Routine,
            "category" => RecommendationKind::Category,
            _ => RecommendationKind::General,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecommendationKind::General => "general",
            RecommendationKind::Category => "category",
            RecommendationKind::Routine => "routine",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    pub analysis: Option<VisionDiagnosis>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Recommendations {
    Products(Vec<Product>),
    Routine(RoutineRecommendation),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSummary {
    pub skin_age: i32,
    pub skin_type: String,
    pub declared_concerns: Vec<String>,
}

impl From<&RecommendationContext> for ContextSummary {
    fn from(context: &RecommendationContext) -> Self {
        Self {
            skin_age: context.skin_age,
            skin_type: context.skin_type.clone(),
            declared_concerns: context.declared_concerns.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub recommendations: Recommendations,
    pub context: ContextSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRequest {
    pub partner_id: Option<String>,
    pub base_price: Option<f64>,
    pub quantity: Option<u32>,
    pub product_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommissionResponse {
    pub success: bool,
    pub commission: CommissionData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionQuery {
    pub avg_order_value: Option<f64>,
    pub daily_clicks: Option<f64>,
    pub conversion_rate: Option<f64>,
    pub avg_commission_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionParameters {
    pub avg_order_value: f64,
    pub daily_clicks: f64,
    pub conversion_rate: f64,
    pub avg_commission_rate: f64,
}

impl ProjectionQuery {
    pub fn parameters(&self) -> ProjectionParameters {
        ProjectionParameters {
            avg_order_value: self.avg_order_value.unwrap_or(50.0),
            daily_clicks: self.daily_clicks.unwrap_or(100.0),
            conversion_rate: self.conversion_rate.unwrap_or(3.0),
            avg_commission_rate: self
                .avg_commission_rate
                .unwrap_or(DEFAULT_AVG_COMMISSION_RATE),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub success: bool,
    pub projection: RevenueProjection,
    pub parameters: ProjectionParameters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub success: bool,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracked_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEventRequest {
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub partner_id: String,
    pub user_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl AnalyticsEventRequest {
    pub fn into_event(self, now: DateTime<Utc>) -> Result<AnalyticsEvent, String> {
        let event_type = self
            .event_type
            .ok_or_else(|| "Données d'événement incomplètes".to_string())?;
        let mut event = AnalyticsEvent::new(
            event_type,
            self.product_id,
            self.partner_id,
            self.timestamp.unwrap_or(now),
        )
        .with_metadata(self.metadata);
        event.user_id = self.user_id;
        event
            .validate()
            .map_err(|_| "Données d'événement incomplètes".to_string())?;
        Ok(event)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub days: Option<i64>,
    pub partner_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub success: bool,
    pub events: Vec<AnalyticsEvent>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
