//! Domain layer for the weather dashboard
//!
//! Contains the value objects and entities exchanged between layers, plus the
//! two pure computations of the system: the US EPA air quality index and the
//! daily aggregation of interval forecasts. This layer performs no I/O.

pub mod air_quality;
pub mod entities;
pub mod errors;
pub mod forecast;
pub mod value_objects;

pub use air_quality::{Breakpoint, PM10_BREAKPOINTS, PM25_BREAKPOINTS, concentration_to_index};
pub use entities::*;
pub use errors::DomainError;
pub use forecast::{MAX_FORECAST_DAYS, aggregate_daily};
pub use value_objects::*;
