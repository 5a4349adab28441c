use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use skin_advisor::chat::FALLBACK_REPLY;
use skin_advisor::config::LlmConfig;
use skin_advisor::{QuestionnaireAnswers, VisionDiagnosis};

#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    api_key: String,
    config: LlmConfig,
}

impl LlmClient {
    pub fn from_env(config: &LlmConfig) -> Option<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .ok()?;
        Some(Self {
            client,
            api_key,
            config: config.clone(),
        })
    }

    pub fn vision_model(&self) -> &str {
        &self.config.vision_model
    }

    pub async fn analyze_skin(
        &self,
        images: &[String],
        questionnaire: &QuestionnaireAnswers,
    ) -> Result<VisionDiagnosis, String> {
        let mut parts = vec![ContentPart::Text {
            text: vision_prompt(questionnaire),
        }];
        parts.extend(images.iter().map(|image| ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: image.clone(),
                detail: "high",
            },
        }));

        let request = ChatRequest {
            model: self.config.vision_model.clone(),
            temperature: self.config.vision_temperature,
            max_tokens: self.config.vision_max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(VISION_SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(parts),
                },
            ],
        };

        let content = self
            .complete(&request)
            .await?
            .ok_or_else(|| "vision response was empty".to_string())?;
        let json = extract_json(&content).ok_or_else(|| "vision response missing JSON".to_string())?;
        let mut diagnosis: VisionDiagnosis = serde_json::from_str(&json)
            .map_err(|err| format!("vision JSON parse failed: {}", err))?;

        diagnosis.confidence = Some(
            diagnosis
                .confidence
                .map(clamp01)
                .unwrap_or(self.config.default_confidence),
        );
        diagnosis.concerns = diagnosis
            .concerns
            .into_iter()
            .map(|concern| concern.trim().to_string())
            .filter(|concern| !concern.is_empty())
            .collect();

        Ok(diagnosis)
    }

    pub async fn chat(&self, context: &str, message: &str) -> Result<String, String> {
        let request = ChatRequest {
            model: self.config.chat_model.clone(),
            temperature: self.config.chat_temperature,
            max_tokens: self.config.chat_max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(context.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(message.to_string()),
                },
            ],
        };

        Ok(self
            .complete(&request)
            .await?
            .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }

    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, String> {
        let url = format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|err| format!("OpenAI request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let detail = error_body.trim();
            if detail.is_empty() {
                return Err(format!("OpenAI API error: {}", status));
            }
            return Err(format!("OpenAI API error: {} {}", status, detail));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|err| format!("OpenAI response parse failed: {}", err))?;

        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty()))
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
    detail: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

const VISION_SYSTEM_PROMPT: &str = "Tu es un expert dermatologue qui fait des analyses précises \
et détaillées de peau pour recommander des cosmétiques. Réponds uniquement en JSON.";

fn vision_prompt(questionnaire: &QuestionnaireAnswers) -> String {
    let sensitivities = if questionnaire.sensitivities.is_empty() {
        "Aucune".to_string()
    } else {
        questionnaire.sensitivities.join(", ")
    };
    let main_concern = questionnaire
        .main_concern
        .map(|concern| concern.label())
        .unwrap_or("Non précisée");
    let budget = questionnaire
        .budget
        .map(|budget| budget.label())
        .unwrap_or("Non précisé");
    let complexity = questionnaire
        .routine_complexity
        .map(|complexity| complexity.label())
        .unwrap_or("Non précisée");

    format!(
        r#"Analyse ces photos de visage pour un diagnostic cosmétique.

PROFIL:
- Âge: {age} ans
- Sensibilités: {sensitivities}
- Routine actuelle: {routine}
- Préoccupation principale: {main_concern}
- Budget: {budget}
- Complexité souhaitée: {complexity}
- Précisions: {free_text}

Décris le type de peau de façon spécifique (ex: "Peau Mixte avec Zone T Grasse, Joues Normales-Sèches")
et liste des observations précises et visibles (pores dilatés, brillances, taches, rougeurs, texture).

Réponds avec un seul objet JSON:
{{
  "skinType": "...",
  "skinTypeExplanation": "2-3 phrases",
  "concerns": ["observation 1", "observation 2"],
  "confidence": 0.0,
  "products": [{{"name": "", "brand": "", "price": "", "link": "", "category": "", "image": "", "benefits": "", "application": "", "frequency": ""}}],
  "routine": {{
    "title": "...",
    "morning": {{"steps": [{{"step": "1", "product": "", "action": "", "duration": "", "tips": ""}}]}},
    "evening": {{"steps": [{{"step": "1", "product": "", "action": "", "duration": "", "tips": ""}}]}},
    "frequency": {{"daily": "", "weekly": "", "monthly": ""}}
  }}
}}"#,
        age = questionnaire.age.label(),
        sensitivities = sensitivities,
        routine = questionnaire.current_routine,
        main_concern = main_concern,
        budget = budget,
        complexity = complexity,
        free_text = questionnaire.free_text.as_deref().unwrap_or("-"),
    )
}

fn extract_json(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(text[start..=end].to_string())
}

fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}
