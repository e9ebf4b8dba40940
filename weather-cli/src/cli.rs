use anyhow::Context;
use clap::Parser;
use tracing::debug;
use waybar_weather_core::{
    FileCache, Orchestrator, PayloadCache, Settings, WttrProvider, render::local_hour,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "waybar-weather", version, about = "wttr.in weather for Waybar")]
pub struct Cli {
    /// Your wttr location. Leave empty to let wttr.in locate you.
    #[arg(short, long)]
    pub location: Option<String>,

    /// Your unit of temperature measurement (C or F).
    #[arg(short, long)]
    pub unit: Option<String>,

    /// Your unit of wind speed measurement (K or M).
    #[arg(short, long)]
    pub windspeed_unit: Option<String>,

    /// Language code for labels and weather descriptions, e.g. "en" or "de".
    #[arg(short = 'L', long)]
    pub lang: Option<String>,
}

impl Cli {
    /// Settings given on the command line; unset flags fall back to the settings file.
    fn overrides(&self) -> Settings {
        Settings {
            location: self.location.clone(),
            unit: self.unit.clone(),
            windspeed_unit: self.windspeed_unit.clone(),
            lang: self.lang.clone(),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let settings = Settings::load()?.overlay(self.overrides());
        let config = settings.render_config();

        let provider = WttrProvider::new().context("Failed to build HTTP client")?;
        let cache: Option<Box<dyn PayloadCache>> = match FileCache::open_default() {
            Ok(cache) => {
                debug!(path = %cache.path().display(), "using weather cache");
                Some(Box::new(cache))
            }
            Err(e) => {
                debug!(error = %e, "weather cache unavailable");
                None
            }
        };

        let outcome = Orchestrator::new(Box::new(provider), cache)
            .run(&config, settings.location(), local_hour())
            .await?;

        if let Some(output) = outcome.into_output() {
            println!("{output}");
        }

        Ok(())
    }
}
