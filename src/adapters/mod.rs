// Adapters layer: concrete clients for the external systems the pipeline talks to.

pub mod feeds;
pub mod line;
pub mod news_api;
pub mod openai;
