use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DOMESTIC_FEEDS: [&str; 3] = [
    "https://news.yahoo.co.jp/rss/categories/business.xml",
    "https://news.yahoo.co.jp/rss/topics/business.xml",
    "https://news.yahoo.co.jp/rss/categories/politics.xml",
];
pub const DEFAULT_DOMESTIC_MAX_ITEMS: usize = 15;

pub const DEFAULT_NEWS_API_ENDPOINT: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_GLOBAL_QUERY: &str =
    "(FOMC) OR (US economy) OR (global markets) OR (inflation) OR (china economy)";
pub const DEFAULT_GLOBAL_MAX_ITEMS: usize = 5;

pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SYSTEM_PROMPT: &str = "あなたは優秀なマーケットアナリストです。";

pub const DEFAULT_BROADCAST_ENDPOINT: &str = "https://api.line.me/v2/bot/message/broadcast";

/// 執行設定；每個欄位都有預設值，沒有設定檔時即為正式環境設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub domestic: DomesticConfig,
    pub global: GlobalConfig,
    pub generation: GenerationConfig,
    pub broadcast: BroadcastConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomesticConfig {
    pub feeds: Vec<String>,
    pub max_items: usize,
}

impl Default for DomesticConfig {
    fn default() -> Self {
        Self {
            feeds: DEFAULT_DOMESTIC_FEEDS.iter().map(|s| s.to_string()).collect(),
            max_items: DEFAULT_DOMESTIC_MAX_ITEMS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub endpoint: String,
    pub query: String,
    pub language: String,
    pub sort_by: String,
    pub page_size: usize,
    pub max_items: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_NEWS_API_ENDPOINT.to_string(),
            query: DEFAULT_GLOBAL_QUERY.to_string(),
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
            page_size: 10,
            max_items: DEFAULT_GLOBAL_MAX_ITEMS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub model: String,
    pub system_prompt: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    pub endpoint: String,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_BROADCAST_ENDPOINT.to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${NEWS_FEED_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 有指定路徑就讀檔，否則使用預設值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                tracing::debug!("Loading configuration from {}", p.display());
                Self::from_file(p)
            }
            None => Ok(Self::default()),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if self.domestic.feeds.is_empty() {
            return Err(EtlError::ConfigError {
                message: "domestic.feeds must list at least one feed URL".to_string(),
            });
        }
        for feed in &self.domestic.feeds {
            validate_url("domestic.feeds", feed)?;
        }
        validate_positive_number("domestic.max_items", self.domestic.max_items, 1)?;

        validate_url("global.endpoint", &self.global.endpoint)?;
        validate_non_empty_string("global.query", &self.global.query)?;
        validate_positive_number("global.page_size", self.global.page_size, 1)?;
        validate_positive_number("global.max_items", self.global.max_items, 1)?;

        validate_url("generation.endpoint", &self.generation.endpoint)?;
        validate_non_empty_string("generation.model", &self.generation.model)?;

        validate_url("broadcast.endpoint", &self.broadcast.endpoint)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_production_settings() {
        let config = AppConfig::default();

        assert_eq!(config.domestic.feeds.len(), 3);
        assert_eq!(config.domestic.max_items, 15);
        assert_eq!(config.global.page_size, 10);
        assert_eq!(config.global.max_items, 5);
        assert_eq!(config.global.language, "en");
        assert_eq!(config.global.sort_by, "publishedAt");
        assert_eq!(config.generation.model, "gpt-4o-mini");
        assert_eq!(
            config.broadcast.endpoint,
            "https://api.line.me/v2/bot/message/broadcast"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_content = r#"
[global]
endpoint = "http://127.0.0.1:9000/v2/everything"

[generation]
model = "gpt-4o"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.global.endpoint, "http://127.0.0.1:9000/v2/everything");
        assert_eq!(config.global.max_items, 5);
        assert_eq!(config.generation.model, "gpt-4o");
        assert_eq!(config.generation.endpoint, DEFAULT_CHAT_ENDPOINT);
        assert_eq!(config.domestic, DomesticConfig::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MARKET_BRIEF_TEST_FEED", "https://feeds.example.com/rss.xml");

        let toml_content = r#"
[domestic]
feeds = ["${MARKET_BRIEF_TEST_FEED}"]
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.domestic.feeds, vec!["https://feeds.example.com/rss.xml"]);

        std::env::remove_var("MARKET_BRIEF_TEST_FEED");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[broadcast]
endpoint = "invalid-url"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let empty_feeds = AppConfig::from_toml_str("[domestic]\nfeeds = []\n").unwrap();
        assert!(empty_feeds.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[domestic\nfeeds = 3").unwrap_err();
        assert!(matches!(err, EtlError::TomlError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[domestic]
max_items = 8
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AppConfig::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.domestic.max_items, 8);
        assert_eq!(config.domestic.feeds.len(), 3);
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }
}
