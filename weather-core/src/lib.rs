//! Core library for the `waybar-weather` module.
//!
//! This crate defines:
//! - Unit and language configuration, plus the optional settings file
//! - Rendering of wttr.in payloads into Waybar's `{text, tooltip}` JSON
//! - The wttr.in provider and the single-file payload cache
//! - The orchestrator that falls back to the cached payload when fetching fails
//!
//! It is used by the `waybar-weather` binary.

pub mod cache;
pub mod config;
pub mod error;
pub mod icons;
pub mod locale;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod render;

pub use cache::{FileCache, PayloadCache};
pub use config::{RenderConfig, Settings, TemperatureUnit, WindSpeedUnit};
pub use error::WeatherError;
pub use orchestrator::{Orchestrator, Outcome};
pub use provider::{WeatherProvider, WttrProvider};
pub use render::{Renderer, WaybarOutput, render};
