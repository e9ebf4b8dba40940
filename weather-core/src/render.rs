//! Turns a raw wttr.in payload into the Waybar `{text, tooltip}` record.

use chrono::{Local, Timelike};
use serde::Serialize;

use crate::{
    config::RenderConfig,
    error::{Result, WeatherError},
    icons,
    locale::{self, Labels},
    model::{Chance, Hour, Payload},
};

/// Hours of the current day older than this many hours are left out.
const PAST_HOURS_SHOWN: i64 = 2;

/// JSON record read by a Waybar custom module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaybarOutput {
    pub text: String,
    pub tooltip: String,
}

/// Renderer bound to one unit family and one language.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    labels: &'static Labels,
}

impl Renderer {
    /// Fails only when `config.lang` has no registered labels.
    pub fn new(config: &RenderConfig) -> Result<Self> {
        let labels = locale::labels(&config.lang)?;
        Ok(Self { config: config.clone(), labels })
    }

    /// Render `payload` and serialize the result. `now_hour` is the local
    /// hour of day used to drop past hours from today's forecast.
    pub fn render(&self, payload: &str, now_hour: u32) -> Result<String> {
        let payload = Payload::parse(payload)?;
        let output = self.output(&payload, now_hour)?;
        Ok(serde_json::to_string(&output)?)
    }

    pub fn output(&self, payload: &Payload, now_hour: u32) -> Result<WaybarOutput> {
        let cfg = &self.config;
        let labels = self.labels;
        let current = payload.current()?;

        let temp = current.fields.text(cfg.temp_key())?;
        let status = format!(
            "{} {}{}",
            icons::glyph(&current.weather_code)?,
            temp,
            cfg.temp_indicator()
        );

        let mut tooltip = format!(
            "<b>{} {}°</b>\n",
            current.fields.description(labels.weather_desc_key)?,
            temp
        );
        tooltip.push_str(&format!(
            "{}: {}°\n",
            labels.feels_like,
            current.fields.text(cfg.feels_like_key())?
        ));
        tooltip.push_str(&format!(
            "{}: {}{}\n",
            labels.wind,
            current.fields.text(cfg.windspeed_key())?,
            cfg.windspeed_indicator()
        ));
        tooltip.push_str(&format!("{}: {}%\n", labels.humidity, current.humidity));

        let threshold = i64::from(now_hour) - PAST_HOURS_SHOWN;

        for (i, day) in payload.weather.iter().enumerate() {
            tooltip.push_str("\n<b>");
            match i {
                0 => tooltip.push_str(&format!("{}, ", labels.today)),
                1 => tooltip.push_str(&format!("{}, ", labels.tomorrow)),
                2 => {
                    if let Some(label) = labels.day_after_tomorrow {
                        tooltip.push_str(&format!("{label}, "));
                    }
                }
                _ => {}
            }
            tooltip.push_str(&format!("{}</b>\n", day.date));

            let astronomy = day.astronomy()?;
            tooltip.push_str(&format!(
                "⬆️ {}° ⬇️ {}° 🌅 {} 🌇 {}\n",
                day.fields.text(cfg.max_temp_key())?,
                day.fields.text(cfg.min_temp_key())?,
                astronomy.sunrise,
                astronomy.sunset
            ));

            for hour in &day.hourly {
                let label = format_time(&hour.time);
                if i == 0 && hour_of_day(&label)? < threshold {
                    continue;
                }
                tooltip.push_str(&self.hour_line(&label, hour)?);
            }
        }

        Ok(WaybarOutput { text: status, tooltip })
    }

    fn hour_line(&self, label: &str, hour: &Hour) -> Result<String> {
        let temp = format!("{}°", hour.fields.text(self.config.hourly_temp_key())?);
        Ok(format!(
            "{} {} {:<3} {}, {}\n",
            label,
            icons::glyph(&hour.weather_code)?,
            temp,
            hour.fields.description(self.labels.weather_desc_key)?,
            rank_chances(hour, self.labels)?
        ))
    }
}

/// Render `payload` with `config`; see [`Renderer::render`].
pub fn render(payload: &str, config: &RenderConfig, now_hour: u32) -> Result<String> {
    Renderer::new(config)?.render(payload, now_hour)
}

/// Current hour of day on the local clock.
pub fn local_hour() -> u32 {
    Local::now().hour()
}

/// Hour label for a wttr.in time code: every `"00"` is removed, then the
/// rest is zero-padded to two characters (`"1700"` -> `"17"`, `"600"` -> `"06"`).
pub fn format_time(time: &str) -> String {
    format!("{:0>2}", time.replace("00", ""))
}

fn hour_of_day(label: &str) -> Result<i64> {
    label.parse().map_err(|_| WeatherError::InvalidNumber {
        field: "time".to_string(),
        value: label.to_string(),
    })
}

/// Positive event probabilities for `hour`, highest first, e.g.
/// `"Rain 71%, Fog 3%"`. Equal probabilities keep [`Chance::all`] order.
pub fn rank_chances(hour: &Hour, labels: &Labels) -> Result<String> {
    let mut ranked = Vec::new();
    for &chance in Chance::all() {
        match hour.chance(chance)? {
            Some(probability) if probability > 0 => {
                ranked.push((labels.chance(chance), probability));
            }
            _ => {}
        }
    }

    // `sort_by` is stable, which keeps declaration order among ties.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(ranked
        .iter()
        .map(|(label, probability)| format!("{label} {probability}%"))
        .collect::<Vec<_>>()
        .join(", "))
}
