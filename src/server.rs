use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    net::SocketAddr,
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tower_http::services::{ServeDir, ServeFile};

use skin_advisor::chat::{build_chat_context, clean_reply};
use skin_advisor::commission::{calculate_commission, daily_projection, CommissionError};
use skin_advisor::config::AppConfig;
use skin_advisor::events::{EventFilter, EventLog};
use skin_advisor::photo::validate_photo;
use skin_advisor::tracking::{product_affiliate_url, AnalyticsEvent, SessionContext, TrackingData};
use skin_advisor::{
    complete_diagnosis, scan_id, PartnerRegistry, ProductCatalog, ProductCategory,
    QuestionnaireAnswers, RecommendationEngine, SkinConcern, VisionDiagnosis,
};

use crate::api::{
    context_from_analysis, AnalyticsEventRequest, AnalyzeSkinRequest, AnalyzeSkinResponse,
    ChatAnalysisRequest, ChatAnalysisResponse, CommissionRequest, CommissionResponse,
    ContextSummary, EventsQuery, EventsResponse, ProductsQuery, ProductsResponse,
    ProjectionQuery, ProjectionResponse, RecommendationKind, Recommendations,
    RecommendationsRequest, RecommendationsResponse, SuccessResponse, TrackResponse,
};
use crate::llm::LlmClient;

const DEFAULT_EVENT_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    catalog: Arc<ProductCatalog>,
    partners: Arc<PartnerRegistry>,
    engine: Arc<RecommendationEngine>,
    llm_client: Option<LlmClient>,
    events: Arc<EventLog<AnalyticsEvent>>,
    clicks: Arc<EventLog<TrackingData>>,
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<StreamEvent>>>>,
}

impl AppState {
    pub async fn from_config(config: AppConfig) -> Result<Self, String> {
        let catalog = match config.catalog.path.as_deref() {
            Some(path) => ProductCatalog::from_path(std::path::Path::new(path))
                .map_err(|err| err.to_string())?,
            None => ProductCatalog::builtin(),
        };
        let max_events = config.analytics.max_events;
        let events = match config.analytics.events_path.as_deref() {
            Some(path) => EventLog::load(PathBuf::from(path), max_events).await?,
            None => EventLog::in_memory(max_events),
        };
        let clicks = match config.analytics.clicks_path.as_deref() {
            Some(path) => EventLog::load(PathBuf::from(path), max_events).await?,
            None => EventLog::in_memory(max_events),
        };

        Ok(Self {
            llm_client: LlmClient::from_env(&config.llm),
            engine: Arc::new(RecommendationEngine::from_config(&config.recommendation)),
            catalog: Arc::new(catalog),
            partners: Arc::new(PartnerRegistry::builtin()),
            events: Arc::new(events),
            clicks: Arc::new(clicks),
            channels: Arc::new(Mutex::new(HashMap::new())),
            config: Arc::new(config),
        })
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct StreamEvent {
    event: String,
    message: String,
    timestamp_ms: u128,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamQuery {
    request_id: String,
}

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub async fn serve(config: AppConfig) -> Result<(), String> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;
    let web_root = config.server.web_root.clone();
    let state = AppState::from_config(config).await?;
    if state.llm_client.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; analyses will use the default diagnosis");
    }
    tracing::info!(products = state.catalog.len(), "catalog loaded");

    let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
    let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));
    let app = router(state).fallback_service(static_service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    tracing::info!(%addr, "skin advisor listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze-skin", post(analyze_handler))
        .route("/api/analyze-skin/stream", get(stream_handler))
        .route("/api/chat-analysis", post(chat_handler))
        .route("/api/products", get(products_handler))
        .route("/api/recommendations", post(recommendations_handler))
        .route(
            "/api/affiliate/commission",
            post(commission_handler).get(projection_handler),
        )
        .route("/api/affiliate/track", post(track_handler))
        .route(
            "/api/analytics/events",
            post(record_event_handler).get(list_events_handler),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeSkinRequest>,
) -> Result<Json<AnalyzeSkinResponse>, ApiError> {
    let (images, questionnaire, request_id) =
        request.into_parts().map_err(ApiError::BadRequest)?;
    for image in &images {
        let validation = validate_photo(image);
        if !validation.is_valid {
            return Err(ApiError::BadRequest(validation.issues.join(", ")));
        }
    }

    let answers = questionnaire.to_answers();
    let request_id = request_id.unwrap_or_else(generate_request_id);
    let scan_id = scan_id(&images, &answers);
    let sender = get_or_create_channel(&state, &request_id).await;
    tracing::info!(%scan_id, photos = images.len(), "skin analysis requested");

    let mut warnings = Vec::new();
    send_event(&sender, "start", "Préparation de l'analyse");
    let vision = match &state.llm_client {
        Some(client) => {
            send_event(&sender, "calling", "Analyse des photos en cours");
            match client.analyze_skin(&images, &answers).await {
                Ok(vision) => {
                    send_event(&sender, "received", "Analyse reçue");
                    Some(vision)
                }
                Err(err) => {
                    tracing::warn!(%scan_id, model = client.vision_model(), error = %err, "vision analysis failed");
                    warnings.push(format!("Analyse IA indisponible: {}", err));
                    send_event(&sender, "error", "Échec de l'analyse IA");
                    None
                }
            }
        }
        None => {
            warnings.push("Analyse IA non configurée: définir OPENAI_API_KEY".to_string());
            send_event(&sender, "error", "Analyse IA non configurée");
            None
        }
    };

    send_event(&sender, "scoring", "Calcul des scores");
    let analysis = complete_diagnosis(vision, &answers);
    if let Some(fallback) = analysis.fallback {
        tracing::warn!(%scan_id, reason = ?fallback.reason, version = fallback.version, "default diagnosis used");
    }
    send_event(&sender, "done", "Analyse terminée");
    schedule_cleanup(state.channels.clone(), request_id.clone());

    Ok(Json(AnalyzeSkinResponse {
        scan_id,
        request_id,
        analysis,
        questionnaire,
        warnings,
    }))
}

async fn stream_handler(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>, StatusCode>
{
    let sender = get_or_create_channel(&state, &query.request_id).await;
    let receiver = sender.subscribe();
    let stream = BroadcastStream::new(receiver).filter_map(|event| match event {
        Ok(event) => {
            let data = serde_json::to_string(&event).unwrap_or_default();
            Some(Ok(Event::default().data(data)))
        }
        Err(_) => None,
    });

    send_event(&sender, "connected", "Suivi de l'analyse");
    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(8))))
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatAnalysisRequest>,
) -> Result<Json<ChatAnalysisResponse>, ApiError> {
    let analysis = request
        .analysis
        .ok_or_else(|| ApiError::BadRequest("Données d'analyse manquantes".to_string()))?;
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message requis".to_string()));
    }
    let client = state
        .llm_client
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("Assistant non configuré".to_string()))?;

    let diagnosis = complete_diagnosis(Some(analysis), &QuestionnaireAnswers::default());
    let context = build_chat_context(&diagnosis);
    let reply = client.chat(&context, message).await.map_err(|err| {
        tracing::error!(error = %err, "chat completion failed");
        ApiError::Internal("Erreur lors du traitement de votre message".to_string())
    })?;

    Ok(Json(ChatAnalysisResponse {
        response: clean_reply(&reply),
    }))
}

async fn products_handler(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(state.config.recommendation.products_page_limit);
    let category = parse_category(query.category.as_deref())?;
    let concern = match query.concern.as_deref().filter(|value| !value.trim().is_empty()) {
        Some(value) => Some(
            SkinConcern::from_str(value)
                .ok_or_else(|| ApiError::BadRequest(format!("préoccupation inconnue: {}", value)))?,
        ),
        None => None,
    };

    let analysis = query.analysis.as_deref().and_then(parse_analysis_param);
    let products: Vec<_> = match (analysis, concern, category) {
        // Ranking replaces the concern filter but keeps the category one.
        (Some(analysis), _, _) => {
            let context = context_from_analysis(Some(&analysis));
            state
                .engine
                .rank(&context, &state.catalog, category)
                .into_iter()
                .map(|scored| scored.product.clone())
                .collect()
        }
        (None, Some(concern), _) => state.catalog.by_concern(concern).into_iter().cloned().collect(),
        (None, None, Some(category)) => {
            state.catalog.by_category(category).into_iter().cloned().collect()
        }
        (None, None, None) => state.catalog.products().to_vec(),
    };

    let total = products.len();
    Ok(Json(ProductsResponse {
        has_more: total > limit,
        products: products.into_iter().take(limit).collect(),
        total,
    }))
}

async fn recommendations_handler(
    State(state): State<AppState>,
    Json(request): Json<RecommendationsRequest>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let analysis = request
        .analysis
        .ok_or_else(|| ApiError::BadRequest("Données d'analyse requises".to_string()))?;
    let kind = RecommendationKind::from_str(request.kind.as_deref().unwrap_or("general"));
    let context = context_from_analysis(Some(&analysis));
    let limit = request
        .limit
        .unwrap_or(state.config.recommendation.default_limit);

    let recommendations = match kind {
        RecommendationKind::Routine => {
            Recommendations::Routine(state.engine.routine(&context, &state.catalog))
        }
        RecommendationKind::Category => {
            let category = parse_category(request.category.as_deref())?;
            Recommendations::Products(state.engine.recommend(&context, &state.catalog, category, limit))
        }
        RecommendationKind::General => {
            Recommendations::Products(state.engine.recommend(&context, &state.catalog, None, limit))
        }
    };

    Ok(Json(RecommendationsResponse {
        success: true,
        kind: kind.label(),
        recommendations,
        context: ContextSummary::from(&context),
    }))
}

async fn commission_handler(
    State(state): State<AppState>,
    Json(request): Json<CommissionRequest>,
) -> Result<Json<CommissionResponse>, ApiError> {
    let partner_id = request
        .partner_id
        .filter(|value| !value.trim().is_empty());
    let base_price = request
        .base_price
        .filter(|value| value.is_finite() && *value > 0.0);
    let (Some(partner_id), Some(base_price)) = (partner_id, base_price) else {
        return Err(ApiError::BadRequest("Partner ID et prix requis".to_string()));
    };

    let quantity = request.quantity.unwrap_or(1);
    let commission = calculate_commission(&state.partners, &partner_id, base_price, quantity)
        .map_err(|err| match err {
            CommissionError::PartnerNotFound(_) => {
                tracing::warn!(%partner_id, "commission requested for unknown partner");
                ApiError::NotFound(err.to_string())
            }
        })?;
    let commission = match request.product_id {
        Some(product_id) => commission.with_product(product_id),
        None => commission,
    };

    Ok(Json(CommissionResponse {
        success: true,
        commission,
    }))
}

async fn projection_handler(Query(query): Query<ProjectionQuery>) -> Json<ProjectionResponse> {
    let parameters = query.parameters();
    let projection = daily_projection(
        parameters.avg_order_value,
        parameters.daily_clicks,
        parameters.conversion_rate,
        parameters.avg_commission_rate,
    );
    Json(ProjectionResponse {
        success: true,
        projection,
        parameters,
    })
}

async fn track_handler(
    State(state): State<AppState>,
    Json(mut click): Json<TrackingData>,
) -> Result<Json<TrackResponse>, ApiError> {
    click
        .validate()
        .map_err(|_| ApiError::BadRequest("Données de tracking incomplètes".to_string()))?;

    let now = Utc::now();
    let session = if click.session_id.trim().is_empty() {
        let mut rng = rand::thread_rng();
        SessionContext::generate(&mut rng, now)
    } else {
        SessionContext::new(click.session_id.clone())
    };
    click.session_id = session.session_id.clone();

    let tracked_url = state
        .catalog
        .find(&click.product_id)
        .zip(state.partners.get(&click.partner_id))
        .map(|(product, partner)| {
            product_affiliate_url(product, partner, &session, now.timestamp_millis())
        });

    let click = click.sanitized();
    tracing::info!(
        session_id = %click.session_id,
        product_id = %click.product_id,
        partner_id = %click.partner_id,
        source = ?click.source,
        "affiliate click"
    );
    state.clicks.record(click).await.map_err(ApiError::Internal)?;

    Ok(Json(TrackResponse {
        success: true,
        session_id: session.session_id,
        tracked_url,
    }))
}

async fn record_event_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyticsEventRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let event = request.into_event(Utc::now()).map_err(ApiError::BadRequest)?;
    tracing::debug!(event_type = ?event.event_type, product_id = %event.product_id, "analytics event");
    state.events.record(event).await.map_err(ApiError::Internal)?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn list_events_handler(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<EventsResponse> {
    let filter = EventFilter {
        partner_id: query.partner_id.filter(|value| !value.trim().is_empty()),
        days: Some(query.days.unwrap_or(DEFAULT_EVENT_DAYS)),
    };
    let events = state.events.list(&filter, Utc::now()).await;
    Json(EventsResponse {
        success: true,
        count: events.len(),
        events,
    })
}

fn parse_category(value: Option<&str>) -> Result<Option<ProductCategory>, ApiError> {
    match value.filter(|value| !value.trim().is_empty()) {
        Some(value) => ProductCategory::from_str(value)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("catégorie inconnue: {}", value))),
        None => Ok(None),
    }
}

/// Clients may percent-encode the JSON a second time; malformed analyses are ignored.
fn parse_analysis_param(raw: &str) -> Option<VisionDiagnosis> {
    let decoded = urlencoding::decode(raw)
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    match serde_json::from_str(&decoded) {
        Ok(analysis) => Some(analysis),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring malformed analysis parameter");
            None
        }
    }
}

async fn get_or_create_channel(
    state: &AppState,
    request_id: &str,
) -> broadcast::Sender<StreamEvent> {
    let mut guard = state.channels.lock().await;
    if let Some(sender) = guard.get(request_id) {
        return sender.clone();
    }
    let (sender, _) = broadcast::channel(32);
    guard.insert(request_id.to_string(), sender.clone());
    sender
}

fn send_event(sender: &broadcast::Sender<StreamEvent>, event: &str, message: &str) {
    let _ = sender.send(StreamEvent {
        event: event.to_string(),
        message: message.to_string(),
        timestamp_ms: now_ms(),
    });
}

fn schedule_cleanup(
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<StreamEvent>>>>,
    request_id: String,
) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        let mut guard = channels.lock().await;
        guard.remove(&request_id);
    });
}

fn generate_request_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{}", now_ms(), counter)
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}
