//! Text rendering for terminal output

use application::{Dashboard, Forecast};
use domain::{AqiResult, CurrentWeather};
use serde_json::{Value, json};

/// Current conditions block
pub fn current_weather(weather: &CurrentWeather) -> String {
    format!(
        "🌡️  {}\n   {:.1}°C, {}\n   Humidity {}% · Wind {:.1} km/h · Visibility {:.1} km",
        weather.location_label(),
        weather.temperature,
        weather.condition,
        weather.humidity,
        weather.wind_speed,
        weather.visibility,
    )
}

/// Forecast table, one line per day
pub fn forecast(forecast: &Forecast) -> String {
    let header = format!("📅 Forecast ({})", forecast.source);
    if forecast.days.is_empty() {
        return format!("{header}\n   No forecast data available");
    }
    let rows = forecast.days.iter().map(|day| {
        let rain = day
            .precipitation_percent()
            .map_or_else(|| "  - ".to_string(), |p| format!("{p:>3}%"));
        format!(
            "   {}  {:>5.1}°C / {:>5.1}°C  {rain}  {}",
            day.date.format("%a %d %b"),
            day.max_temp,
            day.min_temp,
            day.condition,
        )
    });
    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// AQI line with category and advice
pub fn air_quality(result: &AqiResult) -> String {
    let category = result.category();
    format!(
        "🌫️  AQI {} ({category}) · {}\n   {}",
        result.index,
        result.location,
        category.advice()
    )
}

/// Full dashboard
pub fn dashboard(dashboard: &Dashboard) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        current_weather(&dashboard.weather),
        forecast(&dashboard.forecast),
        air_quality(&dashboard.air_quality)
    )
}

/// AQI as JSON, including the derived category
pub fn air_quality_json(result: &AqiResult) -> Value {
    let category = result.category();
    json!({
        "index": result.index,
        "location": result.location,
        "category": category,
        "label": category.label(),
        "advice": category.advice(),
    })
}
