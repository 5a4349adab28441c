use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::recommend::{BonusWeights, RelevanceConfig, DEFAULT_LIMIT};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub web_root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            web_root: "web/dist".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_base: String,
    pub vision_model: String,
    pub chat_model: String,
    pub timeout_ms: u64,
    pub vision_max_tokens: u32,
    pub vision_temperature: f64,
    pub chat_max_tokens: u32,
    pub chat_temperature: f64,
    /// Confidence assumed when the vision reply does not state one.
    pub default_confidence: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            vision_model: "gpt-4o".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            timeout_ms: 60_000,
            vision_max_tokens: 2500,
            vision_temperature: 0.3,
            chat_max_tokens: 500,
            chat_temperature: 0.7,
            default_confidence: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    pub default_limit: usize,
    pub products_page_limit: usize,
    pub routine_pool: usize,
    pub routine_bucket_size: usize,
    pub bonus: BonusWeights,
    pub relevance: RelevanceConfig,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            products_page_limit: 12,
            routine_pool: 12,
            routine_bucket_size: 4,
            bonus: BonusWeights::default(),
            relevance: RelevanceConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON product list replacing the built-in catalog when set.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub events_path: Option<String>,
    pub clicks_path: Option<String>,
    pub max_events: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            events_path: None,
            clicks_path: None,
            max_events: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub recommendation: RecommendationConfig,
    pub catalog: CatalogConfig,
    pub analytics: AnalyticsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                AppConfig::from_toml(&contents)?
            } else {
                AppConfig::default()
            }
        } else {
            AppConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| format!("failed to parse config: {}", err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Some(host) = non_empty_var("ADVISOR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty_var("ADVISOR_PORT") {
            if let Ok(value) = port.parse::<u16>() {
                self.server.port = value;
            }
        }
        if let Some(web_root) = non_empty_var("ADVISOR_WEB_ROOT") {
            self.server.web_root = web_root;
        }
        if let Some(api_base) = non_empty_var("OPENAI_API_BASE") {
            self.llm.api_base = api_base;
        }
        if let Some(model) = non_empty_var("OPENAI_VISION_MODEL") {
            self.llm.vision_model = model;
        }
        if let Some(model) = non_empty_var("OPENAI_CHAT_MODEL") {
            self.llm.chat_model = model;
        }
        if let Some(timeout) = non_empty_var("LLM_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.llm.timeout_ms = value;
            }
        }
        if let Some(path) = non_empty_var("CATALOG_PATH") {
            self.catalog.path = Some(path);
        }
        if let Some(path) = non_empty_var("ANALYTICS_EVENTS_PATH") {
            self.analytics.events_path = Some(path);
        }
        if let Some(path) = non_empty_var("ANALYTICS_CLICKS_PATH") {
            self.analytics.clicks_path = Some(path);
        }
        if let Some(level) = non_empty_var("LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ADVISOR_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/advisor.toml")))
}
