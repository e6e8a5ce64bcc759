pub mod etl;
pub mod pipeline;
pub mod prompt;

pub use crate::domain::model::{Delivery, NewsDigest, NewsItem, Report};
pub use crate::domain::ports::Pipeline;
pub use crate::utils::error::Result;
