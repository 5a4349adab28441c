use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use skin_advisor::events::{EventFilter, EventLog};
use skin_advisor::tracking::{
    affiliate_url, product_affiliate_url, AnalyticsEvent, EventType, SessionContext,
    TrackingData, TrackingSource,
};
use skin_advisor::{PartnerRegistry, ProductCatalog};

#[test]
fn session_id_format() {
    let mut rng = StdRng::seed_from_u64(7);
    let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    let session = SessionContext::generate(&mut rng, now);

    let parts: Vec<&str> = session.session_id.split('_').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "skincare");
    assert_eq!(parts[1], "1700000000123");
    assert_eq!(parts[2].len(), 9);
    assert!(parts[2]
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert!(session.user_id.is_none());
}

#[test]
fn seeded_sessions_are_reproducible() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    let first = SessionContext::generate(&mut StdRng::seed_from_u64(42), now);
    let second = SessionContext::generate(&mut StdRng::seed_from_u64(42), now);
    assert_eq!(first, second);
}

#[test]
fn affiliate_url_picks_separator() {
    let session = SessionContext::new("skincare_1_abc");
    let url = affiliate_url(
        "https://www.sephora.fr/p/gel",
        "utm_source=skincare_ai",
        "cerave gel",
        &session,
        42,
    );
    assert_eq!(
        url,
        "https://www.sephora.fr/p/gel?utm_source=skincare_ai&skincare_session=skincare_1_abc&skincare_product=cerave%20gel&skincare_time=42"
    );

    let url = affiliate_url("https://amzn.to/x?ref=1", "tag=t", "p", &session, 1);
    assert!(url.starts_with("https://amzn.to/x?ref=1&tag=t&"));
}

#[test]
fn product_url_uses_partner_tracking() {
    let catalog = ProductCatalog::builtin();
    let partners = PartnerRegistry::builtin();
    let product = catalog.find("cerave-daily-moisturizer").unwrap();
    let partner = partners.get(&product.partner_id).unwrap();
    let url = product_affiliate_url(product, partner, &SessionContext::new("s1"), 5);
    assert!(url.contains("tag=skincare_ai-21"));
    assert!(url.ends_with("&skincare_session=s1&skincare_product=cerave-daily-moisturizer&skincare_time=5"));
}

#[test]
fn click_validation_and_sanitizing() {
    let catalog = ProductCatalog::builtin();
    let product = catalog.find("avene-fluide-spf50").unwrap();
    let session = SessionContext::new("s1").with_user("u1");
    let mut click = TrackingData::click(&session, product, TrackingSource::Category, Utc::now());
    assert!(click.validate().is_ok());
    assert_eq!(click.user_id.as_deref(), Some("u1"));
    assert_eq!(click.partner_id, "sephora");

    click.user_agent = "é".repeat(250);
    let click = click.sanitized();
    assert_eq!(click.user_agent.chars().count(), 200);

    let mut missing = click.clone();
    missing.partner_id = String::new();
    assert_eq!(missing.validate().unwrap_err(), "partnerId is required");
}

#[test]
fn analytics_event_json_shape() {
    let event = AnalyticsEvent::new(
        EventType::PurchaseIntent,
        "p1",
        "nocibe",
        Utc.timestamp_millis_opt(0).unwrap(),
    )
    .with_metadata(serde_json::json!({ "source": "recommendation" }));
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["eventType"], "purchase_intent");
    assert_eq!(value["partnerId"], "nocibe");
    assert_eq!(value["metadata"]["source"], "recommendation");
}

#[tokio::test]
async fn event_log_is_newest_first_and_capped() {
    let log: EventLog<AnalyticsEvent> = EventLog::in_memory(2);
    let now = Utc::now();
    for id in ["a", "b", "c"] {
        log.record(AnalyticsEvent::new(EventType::ProductView, id, "sephora", now))
            .await
            .unwrap();
    }
    let events = log.list(&EventFilter::default(), now).await;
    let ids: Vec<&str> = events.iter().map(|event| event.product_id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b"]);
}

#[tokio::test]
async fn event_log_filters_by_partner_and_age() {
    let log: EventLog<AnalyticsEvent> = EventLog::in_memory(10);
    let now = Utc::now();
    log.record(AnalyticsEvent::new(EventType::ProductClick, "old", "sephora", now - Duration::days(10)))
        .await
        .unwrap();
    log.record(AnalyticsEvent::new(EventType::ProductClick, "recent", "sephora", now - Duration::days(1)))
        .await
        .unwrap();
    log.record(AnalyticsEvent::new(EventType::Conversion, "other", "amazon", now))
        .await
        .unwrap();

    let week = EventFilter {
        partner_id: None,
        days: Some(7),
    };
    assert_eq!(log.list(&week, now).await.len(), 2);

    let sephora_week = EventFilter {
        partner_id: Some("sephora".to_string()),
        days: Some(7),
    };
    let events = log.list(&sephora_week, now).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].product_id, "recent");
    assert_eq!(log.len().await, 3);
}

#[tokio::test]
async fn event_log_persists_to_disk() {
    let dir = std::env::temp_dir().join(format!("skin-advisor-events-{}", std::process::id()));
    let path = dir.join("clicks.json");
    let _ = tokio::fs::remove_file(&path).await;

    let session = SessionContext::new("s1");
    let catalog = ProductCatalog::builtin();
    let product = catalog.find("the-ordinary-niacinamide").unwrap();
    {
        let log: EventLog<TrackingData> = EventLog::load(path.clone(), 5).await.unwrap();
        log.record(TrackingData::click(&session, product, TrackingSource::Search, Utc::now()))
            .await
            .unwrap();
    }

    let reloaded: EventLog<TrackingData> = EventLog::load(path.clone(), 5).await.unwrap();
    let clicks = reloaded.list(&EventFilter::default(), Utc::now()).await;
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].product_id, "the-ordinary-niacinamide");
    assert_eq!(clicks[0].source, TrackingSource::Search);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn failed_write_leaves_the_log_unchanged() {
    let blocker = std::env::temp_dir().join(format!("skin-advisor-blocker-{}", std::process::id()));
    tokio::fs::write(&blocker, b"not a directory").await.unwrap();
    let path = blocker.join("events.json");

    let log: EventLog<AnalyticsEvent> = EventLog::load(path, 5).await.unwrap();
    let event = AnalyticsEvent::new(EventType::ProductView, "p1", "sephora", Utc::now());
    assert!(log.record(event.clone()).await.is_err());
    assert_eq!(log.len().await, 0);
    assert!(log.record(event).await.is_err());
    assert_eq!(log.len().await, 0);

    let _ = tokio::fs::remove_file(&blocker).await;
}
