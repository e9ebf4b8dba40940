use crate::error::{Result, WeatherError};

/// Glyph for a wttr.in weather condition code. Unknown codes are an error.
pub fn glyph(code: &str) -> Result<&'static str> {
    let glyph = match code {
        "113" => "☀️",
        "116" => "⛅️",
        "119" | "122" => "☁️",
        "143" | "248" | "260" => "🌫",
        "176" | "263" | "266" | "293" | "296" | "353" => "🌦",
        "179" | "182" | "185" | "281" | "284" | "299" | "302" | "305" | "308" | "311" | "314"
        | "317" | "350" | "356" | "359" | "362" | "365" | "374" | "377" => "🌧",
        "200" | "386" | "392" => "⛈",
        "227" | "320" | "323" | "326" | "368" => "🌨",
        "230" | "329" | "332" | "335" | "338" | "371" | "395" => "❄️",
        "389" => "🌩",
        other => return Err(WeatherError::UnknownWeatherCode(other.to_string())),
    };

    Ok(glyph)
}
