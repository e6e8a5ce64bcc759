use crate::core::{Delivery, Pipeline};
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 依序執行三個階段；transform 失敗時直接返回，不會進入 load
    pub async fn run(&self) -> Result<Delivery> {
        let started = Instant::now();
        tracing::info!(
            "Starting market brief run at {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S %z")
        );

        // Extract
        let digest = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} items ({} domestic, {} global)",
            digest.len(),
            digest.domestic.len(),
            digest.global.len()
        );

        // Transform
        let report = self.pipeline.transform(digest).await?;

        // Load
        let delivery = self.pipeline.load(report).await?;
        tracing::info!("Run finished in {:?}: {:?}", started.elapsed(), delivery);

        Ok(delivery)
    }
}
