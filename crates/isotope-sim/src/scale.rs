//! Mapping from real elapsed time to simulated decay time.

use std::time::Duration;

use isotope_core::constants::TIME_SCALE_PRESETS;
use isotope_core::error::SimulationError;
use serde::{Deserialize, Serialize};

/// Simulated hours that pass per real minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    hours_per_minute: f64,
}

impl TimeScale {
    pub fn new(hours_per_minute: f64) -> Result<Self, SimulationError> {
        if !hours_per_minute.is_finite() || hours_per_minute <= 0.0 {
            return Err(SimulationError::InvalidTimeScale(hours_per_minute));
        }
        Ok(Self { hours_per_minute })
    }

    /// The scale that plays `horizon_hours` of decay in `real_minutes` of wall time.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use isotope_sim::TimeScale;
    /// let scale = TimeScale::fit(10.0, 2.0).unwrap();
    /// assert_eq!(scale.hours_per_minute(), 5.0);
    /// assert_eq!(scale.simulated_hours(Duration::from_secs(60)), 5.0);
    /// ```
    pub fn fit(horizon_hours: f64, real_minutes: f64) -> Result<Self, SimulationError> {
        if !horizon_hours.is_finite() || horizon_hours <= 0.0 {
            return Err(SimulationError::NonPositiveHorizon(horizon_hours));
        }
        if !real_minutes.is_finite() || real_minutes <= 0.0 {
            return Err(SimulationError::NonPositiveRealDuration(real_minutes));
        }
        Self::new(horizon_hours / real_minutes)
    }

    pub fn hours_per_minute(&self) -> f64 {
        self.hours_per_minute
    }

    pub fn simulated_hours(&self, real: Duration) -> f64 {
        real.as_secs_f64() / 60.0 * self.hours_per_minute
    }

    /// Wall time needed to simulate `hours`.
    ///
    /// Non-positive input maps to zero; spans too long for a [`Duration`]
    /// saturate at [`Duration::MAX`].
    pub fn real_duration(&self, hours: f64) -> Duration {
        if !(hours > 0.0) {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(hours / self.hours_per_minute * 60.0).unwrap_or(Duration::MAX)
    }

    /// The selectable presets, labelled.
    pub fn presets() -> Vec<(&'static str, TimeScale)> {
        TIME_SCALE_PRESETS
            .iter()
            .map(|&(label, hours)| (label, TimeScale { hours_per_minute: hours }))
            .collect()
    }
}
