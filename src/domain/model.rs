use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub description: Option<String>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// extract 階段的輸出：國內與海外兩組新聞
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsDigest {
    pub domestic: Vec<NewsItem>,
    pub global: Vec<NewsItem>,
}

impl NewsDigest {
    pub fn len(&self) -> usize {
        self.domestic.len() + self.global.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domestic.is_empty() && self.global.is_empty()
    }
}

/// 生成 API 回傳的原始文字，不做任何解析
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report(String);

impl Report {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Delivered { status: u16, body: String },
    Rejected { status: u16, body: String },
    Failed { reason: String },
    Skipped,
}

impl Delivery {
    /// 未送達的情況需要人工補發
    pub fn needs_resend(&self) -> bool {
        matches!(self, Delivery::Rejected { .. } | Delivery::Failed { .. })
    }
}

/// 機密字串，Debug 與 Display 都不會輸出內容
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_redacted() {
        let secret = Secret::new("super-secret-token");
        assert_eq!(format!("{:?}", secret), "Secret(***)");
        assert_eq!(secret.to_string(), "***");
        assert_eq!(secret.expose(), "super-secret-token");
    }

    #[test]
    fn test_missing_description_renders_empty() {
        let item = NewsItem::new("headline", None);
        assert_eq!(item.description_or_empty(), "");
    }

    #[test]
    fn test_delivery_needs_resend() {
        assert!(!Delivery::Skipped.needs_resend());
        assert!(!Delivery::Delivered {
            status: 200,
            body: "{}".to_string()
        }
        .needs_resend());
        assert!(Delivery::Rejected {
            status: 401,
            body: String::new()
        }
        .needs_resend());
        assert!(Delivery::Failed {
            reason: "connection refused".to_string()
        }
        .needs_resend());
    }
}
