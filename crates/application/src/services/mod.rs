//! Application services

mod dashboard_service;

pub use dashboard_service::{Dashboard, DashboardService, Forecast, ForecastSource};
