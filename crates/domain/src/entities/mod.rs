//! Domain entities - immutable results of a single fetch or computation

mod air_quality;
mod location;
mod weather;

pub use air_quality::{AqiCategory, AqiResult, PollutantReading};
pub use location::ResolvedCity;
pub use weather::{CurrentWeather, ForecastDay, IntervalSample, NO_CONDITION};
