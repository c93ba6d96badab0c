//! Background tasks

mod aqi_refresh;

pub use aqi_refresh::{AqiRefreshHandle, DEFAULT_REFRESH_INTERVAL, spawn_aqi_refresh_task};
