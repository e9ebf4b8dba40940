//! Display labels per language.
//!
//! New languages are added by appending to [`LOCALES`]; the renderer only
//! ever sees a [`Labels`] value.

use crate::error::{Result, WeatherError};
use crate::model::Chance;

/// Labels used in the tooltip for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub feels_like: &'static str,
    pub wind: &'static str,
    pub humidity: &'static str,
    pub today: &'static str,
    pub tomorrow: &'static str,
    /// Not every language labels the third forecast day.
    pub day_after_tomorrow: Option<&'static str>,
    /// Payload key holding the weather description in this language.
    pub weather_desc_key: &'static str,
    pub fog: &'static str,
    pub frost: &'static str,
    pub overcast: &'static str,
    pub rain: &'static str,
    pub snow: &'static str,
    pub sunshine: &'static str,
    pub thunder: &'static str,
    pub windy: &'static str,
}

impl Labels {
    pub fn chance(&self, chance: Chance) -> &'static str {
        match chance {
            Chance::Fog => self.fog,
            Chance::Frost => self.frost,
            Chance::Overcast => self.overcast,
            Chance::Rain => self.rain,
            Chance::Snow => self.snow,
            Chance::Sunshine => self.sunshine,
            Chance::Thunder => self.thunder,
            Chance::Windy => self.windy,
        }
    }
}

pub const EN: Labels = Labels {
    feels_like: "Feels like",
    wind: "Wind",
    humidity: "Humidity",
    today: "Today",
    tomorrow: "Tomorrow",
    day_after_tomorrow: None,
    weather_desc_key: "weatherDesc",
    fog: "Fog",
    frost: "Frost",
    overcast: "Overcast",
    rain: "Rain",
    snow: "Snow",
    sunshine: "Sunshine",
    thunder: "Thunder",
    windy: "Wind",
};

pub const DE: Labels = Labels {
    feels_like: "Gefühlt",
    wind: "Wind",
    humidity: "Luftfeuchtigkeit",
    today: "Heute",
    tomorrow: "Morgen",
    day_after_tomorrow: Some("Übermorgen"),
    weather_desc_key: "lang_de",
    fog: "Nebel",
    frost: "Frost",
    overcast: "Bewölkt",
    rain: "Regen",
    snow: "Schnee",
    sunshine: "Sonne",
    thunder: "Gewitter",
    windy: "Wind",
};

/// Registered languages, keyed by the wttr.in language code.
pub static LOCALES: &[(&str, Labels)] = &[("en", EN), ("de", DE)];

/// Look up the labels for `lang`.
pub fn labels(lang: &str) -> Result<&'static Labels> {
    LOCALES
        .iter()
        .find(|(code, _)| *code == lang)
        .map(|(_, labels)| labels)
        .ok_or_else(|| {
            let known: Vec<&str> = LOCALES.iter().map(|(code, _)| *code).collect();
            WeatherError::UnsupportedLocale(lang.to_string(), known.join(", "))
        })
}
