use crate::domain::model::{Delivery, NewsDigest, Report};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<NewsDigest>;
    async fn transform(&self, digest: NewsDigest) -> Result<Report>;
    async fn load(&self, report: Report) -> Result<Delivery>;
}
