use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, WeatherError};

use super::WeatherProvider;

/// Upper bound for the whole wttr.in request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches `?format=j1` payloads from wttr.in.
#[derive(Debug, Clone)]
pub struct WttrProvider {
    http: Client,
    base_url: Option<Url>,
}

impl WttrProvider {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: None })
    }

    /// Send requests to `base_url` instead of `https://{lang}.wttr.in/`.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// `https://{lang}.wttr.in/{location}?format=j1`, with `location`
    /// encoded as a single path segment.
    pub fn request_url(&self, location: &str, lang: &str) -> Result<Url> {
        let mut url = match &self.base_url {
            Some(base) => base.clone(),
            None => Url::parse(&format!("https://{lang}.wttr.in/"))
                .map_err(|e| WeatherError::Url(e.to_string()))?,
        };

        url.path_segments_mut()
            .map_err(|_| WeatherError::Url("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(location);
        url.query_pairs_mut().append_pair("format", "j1");

        Ok(url)
    }
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    async fn fetch_payload(&self, location: &str, lang: &str) -> Result<String> {
        let url = self.request_url(location, lang)?;
        debug!(%url, "requesting wttr.in payload");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "wttr.in request failed");
            return Err(WeatherError::Status(status));
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
