pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::credentials::Credentials;
pub use config::toml_config::AppConfig;
pub use config::CliConfig;
pub use core::{etl::EtlEngine, pipeline::MarketBriefPipeline};
pub use domain::model::{Delivery, NewsDigest, NewsItem, Report, Secret};
pub use utils::error::{EtlError, Result};
