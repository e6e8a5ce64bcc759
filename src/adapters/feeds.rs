use crate::domain::model::NewsItem;
use crate::utils::error::{EtlError, Result};
use feed_rs::parser::ParseFeedError;
use reqwest::Client;
use std::collections::HashSet;

/// 國內 RSS/Atom 來源：依序讀取、以標題去重、截斷至上限
pub struct DomesticFeedCollector {
    client: Client,
    feeds: Vec<String>,
    max_items: usize,
}

impl DomesticFeedCollector {
    pub fn new(client: Client, feeds: Vec<String>, max_items: usize) -> Self {
        Self {
            client,
            feeds,
            max_items,
        }
    }

    /// 任何單一來源失敗都只會貢獻零筆，不會中止整個流程
    pub async fn collect(&self) -> Vec<NewsItem> {
        let mut per_feed = Vec::with_capacity(self.feeds.len());

        for url in &self.feeds {
            match self.fetch_feed(url).await {
                Ok(items) => {
                    tracing::debug!(feed = %url, entries = items.len(), "Feed parsed");
                    per_feed.push(items);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Skipping feed {}: {}", url, e);
                }
            }
        }

        let items = merge_unique(per_feed, self.max_items);
        tracing::info!("📰 Collected {} domestic items", items.len());
        items
    }

    async fn fetch_feed(&self, url: &str) -> Result<Vec<NewsItem>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::FeedError {
                url: url.to_string(),
                message: format!("unexpected status {}", status),
            });
        }

        let bytes = response.bytes().await?;
        parse_feed(&bytes).map_err(|e| EtlError::FeedError {
            url: url.to_string(),
            message: format!("failed to parse feed: {}", e),
        })
    }
}

/// 將 RSS/Atom 文件轉為 NewsItem；沒有標題的項目略過
pub fn parse_feed(bytes: &[u8]) -> std::result::Result<Vec<NewsItem>, ParseFeedError> {
    let feed = feed_rs::parser::parse(bytes)?;

    let items = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.title.map(|t| t.content)?;
            let description = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .filter(|d| !d.trim().is_empty());
            Some(NewsItem::new(title, description))
        })
        .collect();

    Ok(items)
}

/// 依來源順序攤平，保留每個標題第一次出現的項目
pub fn merge_unique<I>(feeds: I, max_items: usize) -> Vec<NewsItem>
where
    I: IntoIterator<Item = Vec<NewsItem>>,
{
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for item in feeds.into_iter().flatten() {
        if seen.insert(item.title.clone()) {
            items.push(item);
        }
    }

    items.truncate(max_items);
    items
}
