use crate::config::toml_config::GlobalConfig;
use crate::domain::model::{NewsItem, Secret};
use crate::utils::error::Result;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    description: Option<String>,
}

/// NewsAPI `everything` 查詢，只取第一頁
pub struct GlobalNewsCollector {
    client: Client,
    config: GlobalConfig,
    api_key: Secret,
}

impl GlobalNewsCollector {
    pub fn new(client: Client, config: GlobalConfig, api_key: Secret) -> Self {
        Self {
            client,
            config,
            api_key,
        }
    }

    pub async fn collect(&self) -> Vec<NewsItem> {
        match self.fetch().await {
            Ok(items) => {
                tracing::info!("🌍 Collected {} global items", items.len());
                items
            }
            Err(e) => {
                tracing::warn!("⚠️ Global news unavailable, continuing without it: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<NewsItem>> {
        let page_size = self.config.page_size.to_string();

        tracing::debug!("Querying news search API: {}", self.config.endpoint);

        // URL 帶有 apiKey，錯誤訊息一律去除 URL
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("q", self.config.query.as_str()),
                ("language", self.config.language.as_str()),
                ("sortBy", self.config.sort_by.as_str()),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.expose()),
            ])
            .send()
            .await
            .map_err(|e| e.without_url())?;

        let status = response.status();
        tracing::debug!("News search API status: {}", status);
        if !status.is_success() {
            tracing::warn!("News search API returned {}", status);
            return Ok(Vec::new());
        }

        let body = response.text().await.map_err(|e| e.without_url())?;
        Ok(map_articles(&body, self.config.max_items)?)
    }
}

/// 沒有 `articles` 欄位視為空清單；保持 API 回傳順序
fn map_articles(body: &str, max_items: usize) -> serde_json::Result<Vec<NewsItem>> {
    let parsed: EverythingResponse = serde_json::from_str(body)?;

    Ok(parsed
        .articles
        .into_iter()
        .take(max_items)
        .map(|a| NewsItem::new(a.title.unwrap_or_default(), a.description))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn collector(endpoint: String) -> GlobalNewsCollector {
        let config = GlobalConfig {
            endpoint,
            ..GlobalConfig::default()
        };
        GlobalNewsCollector::new(Client::new(), config, Secret::new("test-news-key"))
    }

    #[test]
    fn test_map_articles_missing_field_is_empty() {
        let items = map_articles(r#"{"status":"error","code":"apiKeyInvalid"}"#, 5).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_map_articles_null_fields() {
        let items =
            map_articles(r#"{"articles":[{"title":null,"description":null,"url":"x"}]}"#, 5).unwrap();
        assert_eq!(items, vec![NewsItem::new("", None)]);
    }

    #[tokio::test]
    async fn test_collect_sends_fixed_query() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v2/everything")
                .query_param(
                    "q",
                    "(FOMC) OR (US economy) OR (global markets) OR (inflation) OR (china economy)",
                )
                .query_param("language", "en")
                .query_param("sortBy", "publishedAt")
                .query_param("pageSize", "10")
                .query_param("apiKey", "test-news-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "status": "ok",
                    "articles": [
                        {"title": "Fed holds rates", "description": "FOMC statement"}
                    ]
                }));
        });

        let items = collector(server.url("/v2/everything")).collect().await;

        api_mock.assert();
        assert_eq!(
            items,
            vec![NewsItem::new("Fed holds rates", Some("FOMC statement".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_collect_truncates_to_first_five_in_order() {
        let server = MockServer::start();
        let articles: Vec<_> = (1..=12)
            .map(|i| json!({"title": format!("article {}", i), "description": format!("desc {}", i)}))
            .collect();

        server.mock(|when, then| {
            when.method(GET).path("/v2/everything");
            then.status(200).json_body(json!({ "articles": articles }));
        });

        let items = collector(server.url("/v2/everything")).collect().await;

        assert_eq!(items.len(), 5);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["article 1", "article 2", "article 3", "article 4", "article 5"]
        );
    }

    #[tokio::test]
    async fn test_collect_error_status_is_empty() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/v2/everything");
            then.status(401)
                .json_body(json!({"status": "error", "code": "apiKeyInvalid"}));
        });

        assert!(collector(server.url("/v2/everything")).collect().await.is_empty());
    }

    #[tokio::test]
    async fn test_collect_malformed_body_is_empty() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/v2/everything");
            then.status(200).body("<html>maintenance</html>");
        });

        assert!(collector(server.url("/v2/everything")).collect().await.is_empty());
    }
}
