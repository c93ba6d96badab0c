//! Application layer - Use cases and orchestration
//!
//! Contains the dashboard use cases, the weather port they depend on and the
//! background AQI refresh task.

pub mod error;
pub mod ports;
pub mod services;
pub mod tasks;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
pub use tasks::{AqiRefreshHandle, DEFAULT_REFRESH_INTERVAL, spawn_aqi_refresh_task};
