//! US EPA air quality index
//!
//! Maps particulate concentrations onto the 0-500 AQI scale using the EPA
//! piecewise-linear breakpoint tables. The overall index is the worst
//! (highest) pollutant sub-index. When no concentration can be mapped the
//! provider's legacy 1-5 index is translated to the centre of the matching
//! band, and when that is missing too the index degrades to 0.

use crate::entities::PollutantReading;

/// Highest value on the AQI scale
pub const MAX_AQI: u16 = 500;

/// One linear segment of the concentration to index mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Lowest concentration of the segment (inclusive)
    pub concentration_low: f64,
    /// Highest concentration of the segment (inclusive)
    pub concentration_high: f64,
    /// Index at `concentration_low`
    pub index_low: f64,
    /// Index at `concentration_high`
    pub index_high: f64,
}

impl Breakpoint {
    const fn new(
        concentration_low: f64,
        concentration_high: f64,
        index_low: f64,
        index_high: f64,
    ) -> Self {
        Self {
            concentration_low,
            concentration_high,
            index_low,
            index_high,
        }
    }

    /// Whether the concentration falls inside this segment
    #[must_use]
    pub fn contains(&self, concentration: f64) -> bool {
        (self.concentration_low..=self.concentration_high).contains(&concentration)
    }

    /// Linear interpolation inside the segment
    ///
    /// Evaluated as `(Ih - Il) / (Ch - Cl) * (C - Cl) + Il`, unfused, so
    /// readings on a half-point round the same way as the EPA formula.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn interpolate(&self, concentration: f64) -> f64 {
        (self.index_high - self.index_low) / (self.concentration_high - self.concentration_low)
            * (concentration - self.concentration_low)
            + self.index_low
    }
}

/// PM2.5 breakpoints (µg/m³, 24-hour average)
pub const PM25_BREAKPOINTS: [Breakpoint; 7] = [
    Breakpoint::new(0.0, 12.0, 0.0, 50.0),
    Breakpoint::new(12.1, 35.4, 51.0, 100.0),
    Breakpoint::new(35.5, 55.4, 101.0, 150.0),
    Breakpoint::new(55.5, 150.4, 151.0, 200.0),
    Breakpoint::new(150.5, 250.4, 201.0, 300.0),
    Breakpoint::new(250.5, 350.4, 301.0, 400.0),
    Breakpoint::new(350.5, 500.4, 401.0, 500.0),
];

/// PM10 breakpoints (µg/m³, 24-hour average)
pub const PM10_BREAKPOINTS: [Breakpoint; 7] = [
    Breakpoint::new(0.0, 54.0, 0.0, 50.0),
    Breakpoint::new(55.0, 154.0, 51.0, 100.0),
    Breakpoint::new(155.0, 254.0, 101.0, 150.0),
    Breakpoint::new(255.0, 354.0, 151.0, 200.0),
    Breakpoint::new(355.0, 424.0, 201.0, 300.0),
    Breakpoint::new(425.0, 504.0, 301.0, 400.0),
    Breakpoint::new(505.0, 604.0, 401.0, 500.0),
];

/// Sub-index of a single pollutant
///
/// Returns `None` when no segment contains the concentration: negative,
/// non-finite, above the top of the table, or inside a gap between segments.
#[must_use]
pub fn concentration_to_index(concentration: f64, table: &[Breakpoint]) -> Option<f64> {
    table
        .iter()
        .find(|bp| bp.contains(concentration))
        .map(|bp| bp.interpolate(concentration))
}

/// Centre of the EPA band matching the provider's 1-5 index
#[must_use]
pub const fn legacy_band_center(legacy_index: u8) -> Option<u16> {
    match legacy_index {
        1 => Some(25),
        2 => Some(75),
        3 => Some(125),
        4 => Some(175),
        5 => Some(250),
        _ => None,
    }
}

/// Overall index of a reading, always within `0..=MAX_AQI`
#[must_use]
pub fn overall_index(reading: &PollutantReading) -> u16 {
    let sub_indices = [
        reading
            .pm2_5
            .and_then(|c| concentration_to_index(c, &PM25_BREAKPOINTS)),
        reading
            .pm10
            .and_then(|c| concentration_to_index(c, &PM10_BREAKPOINTS)),
    ];

    let worst = sub_indices.into_iter().flatten().reduce(f64::max);
    if let Some(worst) = worst {
        return worst.round().clamp(0.0, f64::from(MAX_AQI)) as u16;
    }

    reading
        .legacy_index
        .and_then(legacy_band_center)
        .unwrap_or(0)
}
