use skin_advisor::config::AppConfig;

#[test]
fn defaults_match_service_constants() {
    let config = AppConfig::default();
    assert_eq!(config.server.port, 8787);
    assert_eq!(config.llm.vision_model, "gpt-4o");
    assert_eq!(config.llm.chat_model, "gpt-4o-mini");
    assert_eq!(config.recommendation.default_limit, 6);
    assert_eq!(config.recommendation.products_page_limit, 12);
    assert_eq!(config.recommendation.routine_pool, 12);
    assert_eq!(config.recommendation.routine_bucket_size, 4);
    assert_eq!(config.recommendation.bonus.aging_bonus, 15.0);
    assert_eq!(config.recommendation.relevance.irrelevant_multiplier, 0.1);
    assert_eq!(config.analytics.max_events, 500);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = AppConfig::from_toml(
        r#"
[server]
port = 9000

[recommendation.bonus]
bestseller_bonus = 12.0

[analytics]
events_path = "data/events.json"
"#,
    )
    .unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.recommendation.bonus.bestseller_bonus, 12.0);
    assert_eq!(config.recommendation.bonus.recommended_bonus, 8.0);
    assert_eq!(config.analytics.events_path.as_deref(), Some("data/events.json"));
    assert_eq!(config.analytics.max_events, 500);
}

#[test]
fn invalid_toml_is_reported() {
    let err = AppConfig::from_toml("[server]\nport = \"eighty\"").unwrap_err();
    assert!(err.starts_with("failed to parse config"));
}

#[test]
fn written_config_parses_back() {
    let dir = std::env::temp_dir().join(format!("skin-advisor-config-{}", std::process::id()));
    let path = dir.join("advisor.toml");
    let mut config = AppConfig::default();
    config.recommendation.default_limit = 9;
    config.write(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed = AppConfig::from_toml(&contents).unwrap();
    assert_eq!(parsed.recommendation.default_limit, 9);
    assert_eq!(parsed.llm.timeout_ms, config.llm.timeout_ms);

    let _ = std::fs::remove_dir_all(&dir);
}
