//! Daily aggregation of interval forecasts
//!
//! Used when the provider's daily forecast is unavailable: the 3-hour samples
//! of the 5-day feed are bucketed by UTC calendar date and each bucket is
//! reduced to a single [`ForecastDay`].

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::entities::{ForecastDay, IntervalSample, NO_CONDITION};

/// Maximum number of days a forecast carries
pub const MAX_FORECAST_DAYS: usize = 7;

/// Running reduction of all samples that share a calendar date
#[derive(Debug, Default)]
struct DayBucket {
    min: Option<f64>,
    max: Option<f64>,
    /// Condition counts in first-encountered order
    conditions: Vec<(String, usize)>,
    precipitation_sum: f64,
    samples: usize,
}

impl DayBucket {
    fn add(&mut self, sample: &IntervalSample) {
        if let Some(low) = sample.low() {
            self.min = Some(self.min.map_or(low, |m| m.min(low)));
        }
        if let Some(high) = sample.high() {
            self.max = Some(self.max.map_or(high, |m| m.max(high)));
        }

        match self
            .conditions
            .iter_mut()
            .find(|(condition, _)| *condition == sample.condition)
        {
            Some((_, count)) => *count += 1,
            None => self.conditions.push((sample.condition.clone(), 1)),
        }

        self.precipitation_sum += sample.precipitation_probability.unwrap_or(0.0);
        self.samples += 1;
    }

    /// Most frequent condition; ties go to the one seen first
    fn dominant_condition(&self) -> String {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.conditions {
            if best.is_none_or(|(_, count)| entry.1 > *count) {
                best = Some(entry);
            }
        }
        best.map_or_else(|| NO_CONDITION.to_string(), |(c, _)| c.clone())
    }

    fn into_day(self, date: NaiveDate) -> ForecastDay {
        let precipitation_probability =
            (self.samples > 0).then(|| self.precipitation_sum / self.samples as f64);
        ForecastDay {
            date,
            min_temp: self.min.unwrap_or(0.0),
            max_temp: self.max.unwrap_or(0.0),
            condition: self.dominant_condition(),
            precipitation_probability,
        }
    }
}

/// Reduce interval samples to at most `max_days` daily summaries
///
/// Samples are grouped by the UTC date of their timestamp. Per day the
/// minimum of the lows, the maximum of the highs, the most frequent
/// condition and the mean precipitation probability (missing values count
/// as 0) are computed. Days are returned in ascending order.
///
/// A sample without a low (or high) is left out of that bound instead of
/// counting as 0°C. A day where no sample carries the bound reports 0.
#[must_use]
pub fn aggregate_daily(samples: &[IntervalSample], max_days: usize) -> Vec<ForecastDay> {
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for sample in samples {
        days.entry(sample.date()).or_default().add(sample);
    }

    days.into_iter()
        .take(max_days)
        .map(|(date, bucket)| bucket.into_day(date))
        .collect()
}
