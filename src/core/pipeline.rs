use crate::adapters::feeds::DomesticFeedCollector;
use crate::adapters::line::BroadcastClient;
use crate::adapters::news_api::GlobalNewsCollector;
use crate::adapters::openai::ChatClient;
use crate::config::credentials::{Credentials, LINE_TOKEN_VAR};
use crate::config::toml_config::AppConfig;
use crate::core::prompt::build_prompt;
use crate::core::{Delivery, NewsDigest, Pipeline, Report};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

/// 市場晨報流程：收集新聞 → 生成報告 → LINE 廣播
pub struct MarketBriefPipeline {
    domestic: DomesticFeedCollector,
    global: GlobalNewsCollector,
    generator: ChatClient,
    /// None 代表 dry run
    publisher: Option<BroadcastClient>,
}

impl MarketBriefPipeline {
    /// 建立本次執行專用的 HTTP client，由四個 adapter 共用
    pub fn new(config: AppConfig, credentials: Credentials, dry_run: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("market-brief/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let publisher = match (dry_run, credentials.line_channel_token) {
            (true, _) => None,
            (false, Some(token)) => Some(BroadcastClient::new(
                client.clone(),
                config.broadcast.endpoint.clone(),
                token,
            )),
            (false, None) => {
                return Err(EtlError::MissingConfigError {
                    field: LINE_TOKEN_VAR.to_string(),
                })
            }
        };

        Ok(Self {
            domestic: DomesticFeedCollector::new(
                client.clone(),
                config.domestic.feeds,
                config.domestic.max_items,
            ),
            global: GlobalNewsCollector::new(client.clone(), config.global, credentials.news_api_key),
            generator: ChatClient::new(client, config.generation, credentials.openai_api_key),
            publisher,
        })
    }
}

#[async_trait::async_trait]
impl Pipeline for MarketBriefPipeline {
    async fn extract(&self) -> Result<NewsDigest> {
        tracing::info!("🚀 Collecting domestic feeds");
        let domestic = self.domestic.collect().await;

        tracing::info!("🚀 Querying global news");
        let global = self.global.collect().await;

        if domestic.is_empty() && global.is_empty() {
            tracing::warn!("No news collected from any source; the report will be built from an empty digest");
        }

        Ok(NewsDigest { domestic, global })
    }

    async fn transform(&self, digest: NewsDigest) -> Result<Report> {
        let prompt = build_prompt(&digest);
        tracing::debug!("Prompt built ({} chars)", prompt.chars().count());

        let text = self.generator.complete(&prompt).await?;
        tracing::info!("📝 Report generated ({} chars)", text.chars().count());

        Ok(Report::new(text))
    }

    async fn load(&self, report: Report) -> Result<Delivery> {
        let Some(publisher) = &self.publisher else {
            tracing::info!("📋 Dry run - broadcast skipped");
            println!("{}", report.as_str());
            return Ok(Delivery::Skipped);
        };

        // 廣播失敗只記錄，不中止流程
        let delivery = match publisher.broadcast(report.as_str()).await {
            Ok(response) if response.is_success() => Delivery::Delivered {
                status: response.status,
                body: response.body,
            },
            Ok(response) => {
                tracing::error!(
                    "❌ Broadcast rejected with status {}; the report was not delivered and must be resent manually",
                    response.status
                );
                Delivery::Rejected {
                    status: response.status,
                    body: response.body,
                }
            }
            Err(e) => {
                tracing::error!(
                    "❌ Broadcast failed: {}; the report was not delivered and must be resent manually",
                    e
                );
                Delivery::Failed {
                    reason: e.to_string(),
                }
            }
        };

        Ok(delivery)
    }
}
