//! Read-through cache with network fallback.
//!
//! A run renders the cached payload (stale), then tries a live fetch
//! (fresh). Each step fails independently; only an unsupported locale
//! aborts the run.

use tracing::{debug, info, warn};

use crate::{
    cache::PayloadCache,
    config::RenderConfig,
    error::Result,
    provider::WeatherProvider,
    render::Renderer,
};

/// What a run ends up printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rendered from a payload fetched during this run.
    Fresh(String),
    /// Rendered from the cached payload; the fetch or its render failed.
    Stale(String),
    /// Neither source produced a render.
    Nothing,
}

impl Outcome {
    /// Fresh beats stale beats nothing. Renders are never merged.
    pub fn select(stale: Option<String>, fresh: Option<String>) -> Self {
        match (fresh, stale) {
            (Some(fresh), _) => Outcome::Fresh(fresh),
            (None, Some(stale)) => Outcome::Stale(stale),
            (None, None) => Outcome::Nothing,
        }
    }

    /// The line to print, if any.
    pub fn into_output(self) -> Option<String> {
        match self {
            Outcome::Fresh(output) | Outcome::Stale(output) => Some(output),
            Outcome::Nothing => None,
        }
    }
}

#[derive(Debug)]
pub struct Orchestrator {
    provider: Box<dyn WeatherProvider>,
    cache: Option<Box<dyn PayloadCache>>,
}

impl Orchestrator {
    /// `cache` is `None` when no cache location could be set up; the run
    /// then behaves like a cold start and nothing is persisted.
    pub fn new(provider: Box<dyn WeatherProvider>, cache: Option<Box<dyn PayloadCache>>) -> Self {
        Self { provider, cache }
    }

    pub async fn run(&self, config: &RenderConfig, location: &str, now_hour: u32) -> Result<Outcome> {
        let renderer = Renderer::new(config)?;

        let stale = self.render_cached(&renderer, now_hour);
        let fresh = self.render_fetched(&renderer, &config.lang, location, now_hour).await;

        let outcome = Outcome::select(stale, fresh);
        match &outcome {
            Outcome::Fresh(_) => info!("using fresh weather payload"),
            Outcome::Stale(_) => info!("using cached weather payload"),
            Outcome::Nothing => warn!("no weather payload available"),
        }

        Ok(outcome)
    }

    fn render_cached(&self, renderer: &Renderer, now_hour: u32) -> Option<String> {
        let cache = self.cache.as_ref()?;

        let payload = match cache.read() {
            Ok(payload) => payload,
            Err(e) => {
                debug!(error = %e, "no cached weather payload");
                return None;
            }
        };

        match renderer.render(&payload, now_hour) {
            Ok(output) => Some(output),
            Err(e) => {
                debug!(error = %e, "cached weather payload could not be rendered");
                None
            }
        }
    }

    async fn render_fetched(
        &self,
        renderer: &Renderer,
        lang: &str,
        location: &str,
        now_hour: u32,
    ) -> Option<String> {
        let payload = match self.provider.fetch_payload(location, lang).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "failed to fetch weather payload");
                return None;
            }
        };

        let output = match renderer.render(&payload, now_hour) {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "fetched weather payload could not be rendered");
                return None;
            }
        };

        let written = self.cache.as_ref().map_or(Ok(()), |cache| cache.write(&payload));
        if let Err(e) = written {
            debug!(error = %e, "failed to update weather cache");
        }

        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cache::FileCache,
        error::WeatherError,
        render::render,
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    const FIXTURE: &str = include_str!("../tests/fixtures/wttr_j1.json");

    #[derive(Debug, Default)]
    struct FakeProvider {
        payload: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    impl FakeProvider {
        fn serving(payload: &str) -> Self {
            Self { payload: Some(payload.to_string()), ..Self::default() }
        }

        fn offline() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn fetch_payload(&self, _location: &str, _lang: &str) -> crate::error::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payload
                .clone()
                .ok_or(WeatherError::Status(reqwest::StatusCode::GATEWAY_TIMEOUT))
        }
    }

    fn metric() -> RenderConfig {
        RenderConfig::resolve(Some("C"), Some("K"), None)
    }

    fn orchestrator(provider: FakeProvider, cache: &FileCache) -> Orchestrator {
        Orchestrator::new(Box::new(provider), Some(Box::new(cache.clone())))
    }

    fn warmer_fixture() -> String {
        FIXTURE.replace(r#""temp_C": "9""#, r#""temp_C": "21""#)
    }

    #[test]
    fn selection_prefers_fresh_then_stale() {
        assert_eq!(
            Outcome::select(Some("stale".into()), Some("fresh".into())),
            Outcome::Fresh("fresh".into())
        );
        assert_eq!(Outcome::select(Some("stale".into()), None), Outcome::Stale("stale".into()));
        assert_eq!(Outcome::select(None, None), Outcome::Nothing);
        assert_eq!(Outcome::Nothing.into_output(), None);
    }

    #[tokio::test]
    async fn cold_start_with_network_renders_and_caches() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache.json"));

        let outcome = orchestrator(FakeProvider::serving(FIXTURE), &cache)
            .run(&metric(), "Berlin", 10)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Fresh(render(FIXTURE, &metric(), 10).unwrap()));
        assert_eq!(cache.read().unwrap(), FIXTURE);
    }

    #[tokio::test]
    async fn warm_cache_without_network_renders_stale_payload() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache.json"));
        cache.write(FIXTURE).unwrap();

        let outcome = orchestrator(FakeProvider::offline(), &cache)
            .run(&metric(), "Berlin", 10)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Stale(render(FIXTURE, &metric(), 10).unwrap()));
        assert_eq!(cache.read().unwrap(), FIXTURE);
    }

    #[tokio::test]
    async fn cold_start_without_network_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache.json"));

        let outcome = orchestrator(FakeProvider::offline(), &cache)
            .run(&metric(), "Berlin", 10)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Nothing);
        assert!(cache.read().is_err());
    }

    #[tokio::test]
    async fn fresh_payload_fully_replaces_stale_render() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache.json"));
        cache.write(FIXTURE).unwrap();
        let fresh = warmer_fixture();

        let outcome = orchestrator(FakeProvider::serving(&fresh), &cache)
            .run(&metric(), "Berlin", 10)
            .await
            .unwrap();

        let output = outcome.into_output().unwrap();
        assert_eq!(output, render(&fresh, &metric(), 10).unwrap());
        assert!(output.contains("21°C"));
        assert!(!output.contains("9°C"));
        assert_eq!(cache.read().unwrap(), fresh);
    }

    #[tokio::test]
    async fn unrenderable_fetch_falls_back_and_keeps_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache.json"));
        cache.write(FIXTURE).unwrap();

        let outcome = orchestrator(FakeProvider::serving("Unknown location"), &cache)
            .run(&metric(), "Nowhere", 10)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Stale(render(FIXTURE, &metric(), 10).unwrap()));
        assert_eq!(cache.read().unwrap(), FIXTURE);
    }

    #[tokio::test]
    async fn corrupt_cache_is_treated_as_cold_start() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache.json"));
        cache.write("{\"truncated\":").unwrap();

        let outcome = orchestrator(FakeProvider::offline(), &cache)
            .run(&metric(), "Berlin", 10)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Nothing);
    }

    #[tokio::test]
    async fn unwritable_cache_does_not_hide_fresh_render() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("missing").join("cache.json"));

        let outcome = orchestrator(FakeProvider::serving(FIXTURE), &cache)
            .run(&metric(), "Berlin", 10)
            .await
            .unwrap();

        assert!(matches!(outcome, Outcome::Fresh(_)));
    }

    #[tokio::test]
    async fn missing_cache_location_still_fetches() {
        let orchestrator = Orchestrator::new(Box::new(FakeProvider::serving(FIXTURE)), None);

        let outcome = orchestrator.run(&metric(), "Berlin", 10).await.unwrap();

        assert!(matches!(outcome, Outcome::Fresh(_)));
    }

    #[tokio::test]
    async fn unsupported_locale_aborts_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache.json"));
        cache.write(FIXTURE).unwrap();
        let provider = FakeProvider::serving(FIXTURE);
        let calls = Arc::clone(&provider.calls);
        let cfg = RenderConfig { lang: "xx".to_string(), ..metric() };

        let err = orchestrator(provider, &cache).run(&cfg, "Berlin", 10).await.unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
