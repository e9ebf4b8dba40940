//! Read-only view of the wttr.in `?format=j1` payload.
//!
//! Only the structure the renderer walks is typed. Unit-specific and
//! localized values stay in [`Fields`] and are looked up by key, so the
//! selected unit family and language decide which keys must be present.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, WeatherError};

/// Event categories with an hourly probability, in display tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chance {
    Fog,
    Frost,
    Overcast,
    Rain,
    Snow,
    Sunshine,
    Thunder,
    Windy,
}

impl Chance {
    pub const fn all() -> &'static [Chance] {
        &[
            Chance::Fog,
            Chance::Frost,
            Chance::Overcast,
            Chance::Rain,
            Chance::Snow,
            Chance::Sunshine,
            Chance::Thunder,
            Chance::Windy,
        ]
    }

    /// Payload key holding the percentage for this category.
    pub fn key(&self) -> &'static str {
        match self {
            Chance::Fog => "chanceoffog",
            Chance::Frost => "chanceoffrost",
            Chance::Overcast => "chanceofovercast",
            Chance::Rain => "chanceofrain",
            Chance::Snow => "chanceofsnow",
            Chance::Sunshine => "chanceofsunshine",
            Chance::Thunder => "chanceofthunder",
            Chance::Windy => "chanceofwindy",
        }
    }
}

/// Untyped remainder of a payload record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    /// String value stored under `key`.
    pub fn text(&self, key: &str) -> Result<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| WeatherError::MissingField(key.to_string()))
    }

    /// Integer stored as a numeric string under `key`.
    pub fn number(&self, key: &str) -> Result<i64> {
        let raw = self.text(key)?;
        raw.trim().parse().map_err(|_| WeatherError::InvalidNumber {
            field: key.to_string(),
            value: raw.to_string(),
        })
    }

    /// Description stored as `[{"value": "..."}]` under `key`.
    pub fn description(&self, key: &str) -> Result<&str> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .and_then(|list| list.first())
            .and_then(|entry| entry.get("value"))
            .and_then(Value::as_str)
            .ok_or_else(|| WeatherError::MissingField(key.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payload {
    pub current_condition: Vec<CurrentCondition>,
    pub weather: Vec<Day>,
}

impl Payload {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn current(&self) -> Result<&CurrentCondition> {
        self.current_condition
            .first()
            .ok_or_else(|| WeatherError::MissingField("current_condition".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentCondition {
    #[serde(rename = "weatherCode")]
    pub weather_code: String,
    pub humidity: String,
    #[serde(flatten)]
    pub fields: Fields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Day {
    pub date: String,
    pub astronomy: Vec<Astronomy>,
    pub hourly: Vec<Hour>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Day {
    pub fn astronomy(&self) -> Result<&Astronomy> {
        self.astronomy
            .first()
            .ok_or_else(|| WeatherError::MissingField("astronomy".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Astronomy {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hour {
    pub time: String,
    #[serde(rename = "weatherCode")]
    pub weather_code: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Hour {
    /// Probability for `chance`, or `None` when the record doesn't carry it.
    pub fn chance(&self, chance: Chance) -> Result<Option<i64>> {
        match self.fields.number(chance.key()) {
            Ok(probability) => Ok(Some(probability)),
            Err(WeatherError::MissingField(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hour(value: Value) -> Hour {
        serde_json::from_value(value).expect("valid hour")
    }

    #[test]
    fn unit_fields_are_looked_up_by_key() {
        let h = hour(json!({
            "time": "300",
            "weatherCode": "113",
            "tempC": "12",
            "tempF": "54",
            "weatherDesc": [{"value": "Sunny"}],
        }));

        assert_eq!(h.fields.text("tempC").unwrap(), "12");
        assert_eq!(h.fields.text("tempF").unwrap(), "54");
        assert_eq!(h.fields.description("weatherDesc").unwrap(), "Sunny");
    }

    #[test]
    fn missing_keys_name_the_field() {
        let h = hour(json!({"time": "0", "weatherCode": "113"}));

        let err = h.fields.text("tempC").unwrap_err();
        assert!(matches!(err, WeatherError::MissingField(ref k) if k == "tempC"));

        let err = h.fields.description("lang_de").unwrap_err();
        assert!(matches!(err, WeatherError::MissingField(ref k) if k == "lang_de"));
    }

    #[test]
    fn chance_percentages_must_be_numeric() {
        let h = hour(json!({
            "time": "0",
            "weatherCode": "113",
            "chanceofrain": "35",
            "chanceofsnow": "lots",
        }));

        assert_eq!(h.chance(Chance::Rain).unwrap(), Some(35));
        assert!(matches!(h.chance(Chance::Snow), Err(WeatherError::InvalidNumber { .. })));
        assert_eq!(h.chance(Chance::Fog).unwrap(), None);
    }

    #[test]
    fn payload_requires_current_condition_entry() {
        let payload = Payload::parse(r#"{"current_condition": [], "weather": []}"#).unwrap();
        assert!(payload.current().is_err());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(Payload::parse("<html>"), Err(WeatherError::Json(_))));
        assert!(matches!(Payload::parse(r#"{"weather": []}"#), Err(WeatherError::Json(_))));
    }

    #[test]
    fn chance_keys_follow_declaration_order() {
        let keys: Vec<&str> = Chance::all().iter().map(Chance::key).collect();
        assert_eq!(keys.first(), Some(&"chanceoffog"));
        assert_eq!(keys.last(), Some(&"chanceofwindy"));
        assert_eq!(keys.len(), 8);
    }
}
