use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Application name used for the platform config and cache directories.
pub const APP_NAME: &str = "waybar-weather";

/// Language used when neither the settings file nor the command line picks one.
pub const DEFAULT_LANG: &str = "en";

/// Temperature unit family. Every temperature in the output uses the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    Celsius,
    #[default]
    Fahrenheit,
}

impl TemperatureUnit {
    /// `"C"` selects Celsius; anything else, including no flag, is Fahrenheit.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("C") => TemperatureUnit::Celsius,
            _ => TemperatureUnit::Fahrenheit,
        }
    }
}

/// Wind speed unit family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindSpeedUnit {
    Kmph,
    #[default]
    Miles,
}

impl WindSpeedUnit {
    /// `"K"` selects km/h; anything else, including no flag, is miles per hour.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("K") => WindSpeedUnit::Kmph,
            _ => WindSpeedUnit::Miles,
        }
    }
}

/// Resolved per-run configuration: which payload keys to read and which
/// suffixes to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub temperature: TemperatureUnit,
    pub windspeed: WindSpeedUnit,
    pub lang: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            temperature: TemperatureUnit::default(),
            windspeed: WindSpeedUnit::default(),
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

impl RenderConfig {
    /// Build the bundle from the raw `-u` / `-w` flag values.
    pub fn resolve(unit: Option<&str>, windspeed_unit: Option<&str>, lang: Option<&str>) -> Self {
        Self {
            temperature: TemperatureUnit::from_flag(unit),
            windspeed: WindSpeedUnit::from_flag(windspeed_unit),
            lang: lang.unwrap_or(DEFAULT_LANG).to_string(),
        }
    }

    /// Key of the current-conditions temperature.
    pub fn temp_key(&self) -> &'static str {
        match self.temperature {
            TemperatureUnit::Celsius => "temp_C",
            TemperatureUnit::Fahrenheit => "temp_F",
        }
    }

    /// Key of the temperature in hourly records.
    pub fn hourly_temp_key(&self) -> &'static str {
        match self.temperature {
            TemperatureUnit::Celsius => "tempC",
            TemperatureUnit::Fahrenheit => "tempF",
        }
    }

    pub fn feels_like_key(&self) -> &'static str {
        match self.temperature {
            TemperatureUnit::Celsius => "FeelsLikeC",
            TemperatureUnit::Fahrenheit => "FeelsLikeF",
        }
    }

    pub fn max_temp_key(&self) -> &'static str {
        match self.temperature {
            TemperatureUnit::Celsius => "maxtempC",
            TemperatureUnit::Fahrenheit => "maxtempF",
        }
    }

    pub fn min_temp_key(&self) -> &'static str {
        match self.temperature {
            TemperatureUnit::Celsius => "mintempC",
            TemperatureUnit::Fahrenheit => "mintempF",
        }
    }

    pub fn temp_indicator(&self) -> &'static str {
        match self.temperature {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn windspeed_key(&self) -> &'static str {
        match self.windspeed {
            WindSpeedUnit::Kmph => "windspeedKmph",
            WindSpeedUnit::Miles => "windspeedMiles",
        }
    }

    pub fn windspeed_indicator(&self) -> &'static str {
        match self.windspeed {
            WindSpeedUnit::Kmph => "Km/h",
            WindSpeedUnit::Miles => "Mi/h",
        }
    }
}

/// User settings stored on disk. Every key is optional; command-line flags
/// take precedence over whatever is set here.
///
/// Example TOML:
/// location = "Berlin"
/// unit = "C"
/// windspeed_unit = "K"
/// lang = "de"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub location: Option<String>,
    pub unit: Option<String>,
    pub windspeed_unit: Option<String>,
    pub lang: Option<String>,
}

impl Settings {
    /// Load settings from disk, or return an empty default if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    /// Load settings from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Path to the settings file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", APP_NAME)
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins.
    pub fn overlay(self, overrides: Settings) -> Settings {
        Settings {
            location: overrides.location.or(self.location),
            unit: overrides.unit.or(self.unit),
            windspeed_unit: overrides.windspeed_unit.or(self.windspeed_unit),
            lang: overrides.lang.or(self.lang),
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::resolve(
            self.unit.as_deref(),
            self.windspeed_unit.as_deref(),
            self.lang.as_deref(),
        )
    }

    /// Location passed to wttr.in; empty lets the service geolocate the caller.
    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }
}
