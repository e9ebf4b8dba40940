use thiserror::Error;

/// Errors produced while rendering, fetching or caching weather payloads.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No label table is registered for the requested language.
    #[error("Unsupported locale '{0}'. Supported locales: {1}.")]
    UnsupportedLocale(String, String),

    #[error("Failed to parse weather payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Weather payload is missing field '{0}'")]
    MissingField(String),

    #[error("Unknown weather code '{0}'")]
    UnknownWeatherCode(String),

    #[error("Field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("HTTP request to wttr.in failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("wttr.in responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid wttr.in URL: {0}")]
    Url(String),

    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine platform cache directory")]
    CacheUnavailable,
}

impl WeatherError {
    /// Only configuration defects abort a run; everything else falls through
    /// to the next payload source.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WeatherError::UnsupportedLocale(..))
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
