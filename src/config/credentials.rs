use crate::domain::model::Secret;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_secret;

pub const NEWS_API_KEY_VAR: &str = "NEWS_API_KEY";
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const LINE_TOKEN_VAR: &str = "LINE_CHANNEL_ACCESS_TOKEN";

/// 啟動時讀取一次的三組機密
#[derive(Debug, Clone)]
pub struct Credentials {
    pub news_api_key: Secret,
    pub openai_api_key: Secret,
    /// dry run 時可以不提供
    pub line_channel_token: Option<Secret>,
}

impl Credentials {
    pub fn from_env(require_broadcast: bool) -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok(), require_broadcast)
    }

    pub fn from_lookup<F>(lookup: F, require_broadcast: bool) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let news_api_key = validate_required_secret(NEWS_API_KEY_VAR, lookup(NEWS_API_KEY_VAR))?;
        let openai_api_key =
            validate_required_secret(OPENAI_API_KEY_VAR, lookup(OPENAI_API_KEY_VAR))?;

        let line_channel_token = if require_broadcast {
            Some(validate_required_secret(LINE_TOKEN_VAR, lookup(LINE_TOKEN_VAR))?)
        } else {
            lookup(LINE_TOKEN_VAR).filter(|v| !v.trim().is_empty())
        };

        Ok(Self {
            news_api_key: Secret::new(news_api_key),
            openai_api_key: Secret::new(openai_api_key),
            line_channel_token: line_channel_token.map(Secret::new),
        })
    }
}
