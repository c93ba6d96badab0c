//! OpenWeather API response models
//!
//! Only the fields the dashboard reads are modelled. Everything the provider
//! may omit is optional so that sparse payloads still decode.

use chrono::{DateTime, Utc};
use domain::{
    CurrentWeather, ForecastDay, IntervalSample, MAX_FORECAST_DAYS, NO_CONDITION,
    PollutantReading, ResolvedCity,
};
use serde::Deserialize;

use crate::error::{Operation, WeatherError};

// ============================================================================
// Shared
// ============================================================================

/// Entry of the `weather` array present in most payloads
#[derive(Debug, Deserialize)]
pub struct ConditionEntry {
    #[serde(default)]
    pub description: Option<String>,
}

/// Description of the first condition entry, or `"N/A"`
fn first_description(entries: Option<&[ConditionEntry]>) -> String {
    entries
        .and_then(<[ConditionEntry]>::first)
        .and_then(|entry| entry.description.as_deref())
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(NO_CONDITION)
        .to_string()
}

fn timestamp(unix_seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix_seconds, 0).unwrap_or_default()
}

// ============================================================================
// Geocoding (/geo/1.0/direct)
// ============================================================================

/// Geocoding response: a list of matches, or anything else from a confused upstream
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GeocodingResponse {
    Matches(Vec<GeocodingMatch>),
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub struct GeocodingMatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub country: Option<String>,
}

impl GeocodingResponse {
    /// First match as a resolved city
    pub fn into_city(self, query: &str) -> Result<ResolvedCity, WeatherError> {
        let matches = match self {
            Self::Matches(matches) => matches,
            Self::Other(payload) => {
                tracing::debug!(%payload, "Geocoding returned a non-list payload");
                return Err(WeatherError::NotFound(query.to_string()));
            },
        };
        let best = matches
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(query.to_string()))?;

        let (Some(lat), Some(lon)) = (best.lat, best.lon) else {
            return Err(WeatherError::MalformedResponse {
                operation: Operation::Geocoding,
                reason: "match without coordinates".to_string(),
            });
        };
        let name = best
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| query.trim().to_string());

        ResolvedCity::new(lat, lon, name, best.country.unwrap_or_default()).map_err(|e| {
            WeatherError::MalformedResponse {
                operation: Operation::Geocoding,
                reason: e.to_string(),
            }
        })
    }
}

// ============================================================================
// Current weather (/data/2.5/weather)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: CurrentMain,
    #[serde(default)]
    pub weather: Option<Vec<ConditionEntry>>,
    #[serde(default)]
    pub wind: Option<Wind>,
    /// Metres
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sys: Option<Sys>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    /// Metres per second
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: Option<String>,
}

impl CurrentWeatherResponse {
    /// Convert to the domain entity (km/h wind, km visibility)
    pub fn into_current_weather(self, query: &str) -> CurrentWeather {
        CurrentWeather {
            temperature: self.main.temp,
            condition: first_description(self.weather.as_deref()),
            humidity: self
                .main
                .humidity
                .map_or(0, |h| h.clamp(0.0, 100.0).round() as u8),
            wind_speed: self.wind.and_then(|w| w.speed).unwrap_or(0.0) * 3.6,
            visibility: self.visibility.unwrap_or(0.0) / 1000.0,
            city: self
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| query.to_string()),
            country: self.sys.and_then(|s| s.country).unwrap_or_default(),
        }
    }
}

// ============================================================================
// One Call daily forecast (/data/2.5/onecall)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    #[serde(default)]
    pub daily: Option<Vec<DailyEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct DailyEntry {
    #[serde(default)]
    pub dt: i64,
    #[serde(default)]
    pub temp: Option<DailyTemperature>,
    #[serde(default)]
    pub weather: Option<Vec<ConditionEntry>>,
    #[serde(default)]
    pub pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DailyTemperature {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl OneCallResponse {
    /// First `MAX_FORECAST_DAYS` daily entries in provider order
    pub fn into_forecast(self) -> Vec<ForecastDay> {
        self.daily
            .unwrap_or_default()
            .into_iter()
            .take(MAX_FORECAST_DAYS)
            .map(DailyEntry::into_forecast_day)
            .collect()
    }
}

impl DailyEntry {
    fn into_forecast_day(self) -> ForecastDay {
        let (min, max) = self
            .temp
            .map_or((None, None), |t| (t.min, t.max));
        ForecastDay {
            date: timestamp(self.dt).date_naive(),
            min_temp: min.unwrap_or(0.0),
            max_temp: max.unwrap_or(0.0),
            condition: first_description(self.weather.as_deref()),
            precipitation_probability: self.pop,
        }
    }
}

// ============================================================================
// 5 day / 3 hour forecast (/data/2.5/forecast)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct IntervalForecastResponse {
    #[serde(default)]
    pub list: Option<Vec<IntervalEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct IntervalEntry {
    #[serde(default)]
    pub dt: i64,
    #[serde(default)]
    pub main: Option<IntervalMain>,
    #[serde(default)]
    pub weather: Option<Vec<ConditionEntry>>,
    #[serde(default)]
    pub pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct IntervalMain {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
}

impl IntervalForecastResponse {
    pub fn into_samples(self) -> Vec<IntervalSample> {
        self.list
            .unwrap_or_default()
            .into_iter()
            .map(|entry| {
                let (temperature, temperature_min, temperature_max) = entry
                    .main
                    .map_or((None, None, None), |m| (m.temp, m.temp_min, m.temp_max));
                IntervalSample {
                    timestamp: timestamp(entry.dt),
                    temperature,
                    temperature_min,
                    temperature_max,
                    condition: first_description(entry.weather.as_deref()),
                    precipitation_probability: entry.pop,
                }
            })
            .collect()
    }
}

// ============================================================================
// Air pollution (/data/2.5/air_pollution)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AirPollutionResponse {
    #[serde(default)]
    pub list: Option<Vec<AirPollutionEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct AirPollutionEntry {
    #[serde(default)]
    pub main: Option<AirPollutionMain>,
    #[serde(default)]
    pub components: Option<Components>,
}

#[derive(Debug, Deserialize)]
pub struct AirPollutionMain {
    /// Provider's 1-5 index; non-integer or oversized values read as absent
    #[serde(default)]
    pub aqi: Option<serde_json::Value>,
}

/// Pollutant concentrations in µg/m³
#[derive(Debug, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub pm2_5: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
}

impl AirPollutionResponse {
    /// Reading of the first entry; an empty list yields an empty reading
    pub fn into_reading(self) -> PollutantReading {
        let Some(entry) = self.list.and_then(|list| list.into_iter().next()) else {
            return PollutantReading::default();
        };
        let (pm2_5, pm10) = entry
            .components
            .map_or((None, None), |c| (c.pm2_5, c.pm10));
        PollutantReading {
            pm2_5,
            pm10,
            legacy_index: entry
                .main
                .and_then(|m| m.aqi)
                .as_ref()
                .and_then(serde_json::Value::as_u64)
                .and_then(|v| u8::try_from(v).ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_geocoding_first_match() {
        let json = r#"[
            {"name": "New Delhi", "lat": 28.6139, "lon": 77.209, "country": "IN", "state": "Delhi"},
            {"name": "New Delhi", "lat": 40.0, "lon": -88.0, "country": "US"}
        ]"#;
        let response: GeocodingResponse = serde_json::from_str(json).unwrap();
        let city = response.into_city("new delhi").unwrap();
        assert_eq!(city.city, "New Delhi");
        assert_eq!(city.country, "IN");
        assert!((city.location.latitude() - 28.6139).abs() < 1e-9);
    }

    #[test]
    fn test_geocoding_empty_list_is_not_found() {
        let response: GeocodingResponse = serde_json::from_str("[]").unwrap();
        let err = response.into_city("Atlantis").unwrap_err();
        assert!(matches!(err, WeatherError::NotFound(ref q) if q == "Atlantis"));
    }

    #[test]
    fn test_geocoding_match_without_name_uses_query() {
        let json = r#"[{"lat": 48.8566, "lon": 2.3522, "country": "FR"}]"#;
        let response: GeocodingResponse = serde_json::from_str(json).unwrap();
        let city = response.into_city("  Paris ").unwrap();
        assert_eq!(city.city, "Paris");
        assert_eq!(city.country, "FR");
    }

    #[test]
    fn test_geocoding_match_without_coordinates_is_malformed() {
        let json = r#"[{"name": "Paris", "country": "FR"}]"#;
        let response: GeocodingResponse = serde_json::from_str(json).unwrap();
        let err = response.into_city("Paris").unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MalformedResponse {
                operation: Operation::Geocoding,
                ..
            }
        ));
    }

    #[test]
    fn test_geocoding_non_list_is_not_found() {
        let response: GeocodingResponse =
            serde_json::from_str(r#"{"cod": "400", "message": "Nothing to geocode"}"#).unwrap();
        assert!(matches!(
            response.into_city("x").unwrap_err(),
            WeatherError::NotFound(_)
        ));
    }

    #[test]
    fn test_current_weather_unit_conversion() {
        let json = r#"{
            "weather": [{"id": 721, "main": "Haze", "description": "haze"}],
            "main": {"temp": 31.05, "humidity": 40},
            "wind": {"speed": 5.0},
            "visibility": 3000,
            "name": "New Delhi",
            "sys": {"country": "IN"}
        }"#;
        let response: CurrentWeatherResponse = serde_json::from_str(json).unwrap();
        let weather = response.into_current_weather("new delhi");
        assert!((weather.temperature - 31.05).abs() < f64::EPSILON);
        assert_eq!(weather.condition, "haze");
        assert_eq!(weather.humidity, 40);
        assert!((weather.wind_speed - 18.0).abs() < 1e-9);
        assert!((weather.visibility - 3.0).abs() < 1e-9);
        assert_eq!(weather.city, "New Delhi");
        assert_eq!(weather.country, "IN");
    }

    #[test]
    fn test_current_weather_sparse_payload() {
        let json = r#"{"main": {"temp": 2.5}, "weather": [{"description": ""}]}"#;
        let response: CurrentWeatherResponse = serde_json::from_str(json).unwrap();
        let weather = response.into_current_weather("Oslo");
        assert_eq!(weather.condition, NO_CONDITION);
        assert_eq!(weather.humidity, 0);
        assert!(weather.wind_speed.abs() < f64::EPSILON);
        assert!(weather.visibility.abs() < f64::EPSILON);
        assert_eq!(weather.city, "Oslo");
        assert!(weather.country.is_empty());
    }

    #[test]
    fn test_current_weather_without_main_fails_to_decode() {
        let result = serde_json::from_str::<CurrentWeatherResponse>(r#"{"name": "X"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_one_call_truncates_to_seven_days() {
        let daily: Vec<String> = (0..8)
            .map(|i| {
                format!(
                    r#"{{"dt": {}, "temp": {{"min": 10.0, "max": 20.0}}, "weather": [{{"description": "clear sky"}}], "pop": 0.1}}"#,
                    1_736_942_400 + i * 86_400
                )
            })
            .collect();
        let json = format!(r#"{{"daily": [{}]}}"#, daily.join(","));
        let response: OneCallResponse = serde_json::from_str(&json).unwrap();
        let days = response.into_forecast();

        assert_eq!(days.len(), MAX_FORECAST_DAYS);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(days[0].precipitation_probability, Some(0.1));
    }

    #[test]
    fn test_one_call_missing_daily_is_empty() {
        let response: OneCallResponse = serde_json::from_str(r#"{"lat": 1.0}"#).unwrap();
        assert!(response.into_forecast().is_empty());
        let response: OneCallResponse = serde_json::from_str(r#"{"daily": null}"#).unwrap();
        assert!(response.into_forecast().is_empty());
    }

    #[test]
    fn test_one_call_entry_defaults() {
        let response: OneCallResponse =
            serde_json::from_str(r#"{"daily": [{"dt": 1736942400}]}"#).unwrap();
        let days = response.into_forecast();
        assert!(days[0].min_temp.abs() < f64::EPSILON);
        assert!(days[0].max_temp.abs() < f64::EPSILON);
        assert_eq!(days[0].condition, NO_CONDITION);
        assert!(days[0].precipitation_probability.is_none());
    }

    #[test]
    fn test_interval_samples() {
        let json = r#"{"list": [
            {"dt": 1736942400, "main": {"temp": 12.0, "temp_min": 11.0, "temp_max": 13.0},
             "weather": [{"description": "mist"}], "pop": 0.25},
            {"dt": 1736953200, "main": {"temp": 15.0}}
        ]}"#;
        let response: IntervalForecastResponse = serde_json::from_str(json).unwrap();
        let samples = response.into_samples();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].temperature_min, Some(11.0));
        assert_eq!(samples[0].precipitation_probability, Some(0.25));
        assert_eq!(samples[1].temperature_max, None);
        assert_eq!(samples[1].high(), Some(15.0));
        assert_eq!(samples[1].condition, NO_CONDITION);
    }

    #[test]
    fn test_air_pollution_reading() {
        let json = r#"{"coord": {"lon": 77.2, "lat": 28.6}, "list": [
            {"main": {"aqi": 5}, "components": {"co": 1200.5, "pm2_5": 180.2, "pm10": 250.1}, "dt": 1736942400}
        ]}"#;
        let response: AirPollutionResponse = serde_json::from_str(json).unwrap();
        let reading = response.into_reading();
        assert_eq!(reading.pm2_5, Some(180.2));
        assert_eq!(reading.pm10, Some(250.1));
        assert_eq!(reading.legacy_index, Some(5));
    }

    #[test]
    fn test_air_pollution_unexpected_index_is_dropped() {
        for aqi in ["300", "-1", "\"high\"", "2.5"] {
            let json = format!(r#"{{"list": [{{"main": {{"aqi": {aqi}}}, "components": {{}}}}]}}"#);
            let response: AirPollutionResponse = serde_json::from_str(&json).unwrap();
            let reading = response.into_reading();
            assert_eq!(reading.legacy_index, None, "aqi = {aqi}");
            assert_eq!(domain::air_quality::overall_index(&reading), 0);
        }
    }

    #[test]
    fn test_air_pollution_empty_list() {
        let response: AirPollutionResponse = serde_json::from_str(r#"{"list": []}"#).unwrap();
        assert_eq!(response.into_reading(), PollutantReading::default());
    }
}
