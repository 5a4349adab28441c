use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{AffiliatePartner, Product};

const SESSION_PREFIX: &str = "skincare";
const SESSION_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_USER_AGENT_LEN: usize = 200;

/// Identity of one browsing session, passed explicitly into tracking calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: None,
        }
    }

    /// `skincare_<unix ms>_<9 base-36 chars>`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Self {
        let suffix: String = (0..SESSION_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self::new(format!(
            "{}_{}_{}",
            SESSION_PREFIX,
            now.timestamp_millis(),
            suffix
        ))
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingSource {
    Recommendation,
    Category,
    Search,
}

impl Default for TrackingSource {
    fn default() -> Self {
        TrackingSource::Recommendation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    ProductView,
    ProductClick,
    PurchaseIntent,
    Conversion,
}

/// One outbound affiliate click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingData {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub partner_id: String,
    #[serde(default)]
    pub source: TrackingSource,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub referer: Option<String>,
}

impl TrackingData {
    pub fn click(
        session: &SessionContext,
        product: &Product,
        source: TrackingSource,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: session.user_id.clone(),
            session_id: session.session_id.clone(),
            product_id: product.id.clone(),
            partner_id: product.partner_id.clone(),
            source,
            timestamp,
            user_agent: String::new(),
            referer: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        require_ids(&self.product_id, &self.partner_id)
    }

    /// Caps the user agent before the click is stored.
    pub fn sanitized(mut self) -> Self {
        self.user_agent = truncate_chars(&self.user_agent, MAX_USER_AGENT_LEN);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub event_type: EventType,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub partner_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl AnalyticsEvent {
    pub fn new(
        event_type: EventType,
        product_id: impl Into<String>,
        partner_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            event_type,
            product_id: product_id.into(),
            partner_id: partner_id.into(),
            user_id: None,
            timestamp,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        require_ids(&self.product_id, &self.partner_id)
    }
}

/// Appends the partner's tracking template and our own session parameters.
pub fn affiliate_url(
    base_url: &str,
    tracking_params: &str,
    product_id: &str,
    session: &SessionContext,
    timestamp_ms: i64,
) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}&skincare_session={}&skincare_product={}&skincare_time={}",
        base_url,
        separator,
        tracking_params,
        urlencoding::encode(&session.session_id),
        urlencoding::encode(product_id),
        timestamp_ms
    )
}

pub fn product_affiliate_url(
    product: &Product,
    partner: &AffiliatePartner,
    session: &SessionContext,
    timestamp_ms: i64,
) -> String {
    affiliate_url(
        &product.affiliate_url,
        &partner.tracking_param,
        &product.id,
        session,
        timestamp_ms,
    )
}

fn require_ids(product_id: &str, partner_id: &str) -> Result<(), String> {
    if product_id.trim().is_empty() {
        return Err("productId is required".to_string());
    }
    if partner_id.trim().is_empty() {
        return Err("partnerId is required".to_string());
    }
    Ok(())
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
