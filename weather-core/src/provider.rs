use crate::error::Result;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod wttr;

pub use wttr::WttrProvider;

/// Source of raw weather payloads.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the raw JSON payload for `location`, with descriptions in `lang`.
    async fn fetch_payload(&self, location: &str, lang: &str) -> Result<String>;
}
