//! Decay curve sampling, point inspection and run statistics.
//!
//! These helpers operate on sequences of [`Sample`]s, whether produced in
//! one shot by [`sample_curve`] or accumulated tick by tick by a running
//! simulation.

use isotope_core::constants::MAX_CURVE_STEPS;
use isotope_core::error::DomainError;
use isotope_core::traits::DecayModel;
use isotope_core::types::Sample;
use serde::{Deserialize, Serialize};

/// Evaluate a single sample of the decay curve at `elapsed_hours`.
pub fn sample_at(
    model: &dyn DecayModel,
    initial_activity: f64,
    half_life: f64,
    elapsed_hours: f64,
) -> Result<Sample, DomainError> {
    let activity_mbq = model.activity_at(initial_activity, elapsed_hours, half_life)?;
    Ok(Sample {
        elapsed_hours,
        activity_mbq,
        gamma: model.gamma_ratio(activity_mbq, initial_activity),
    })
}

/// Sample the decay curve on a uniform grid of `steps + 1` points over `[0, horizon_hours]`.
///
/// The first sample is always `(0, initial_activity, γ)`. A zero step count,
/// or a horizon that is not a positive finite number, yields only that sample.
/// More than [`MAX_CURVE_STEPS`] intervals is rejected.
pub fn sample_curve(
    model: &dyn DecayModel,
    initial_activity: f64,
    half_life: f64,
    horizon_hours: f64,
    steps: usize,
) -> Result<Vec<Sample>, DomainError> {
    if steps > MAX_CURVE_STEPS {
        return Err(DomainError::TooManySteps {
            steps,
            max: MAX_CURVE_STEPS,
        });
    }
    let first = sample_at(model, initial_activity, half_life, 0.0)?;
    if steps == 0 || !horizon_hours.is_finite() || horizon_hours <= 0.0 {
        return Ok(vec![first]);
    }

    let mut samples = Vec::with_capacity(steps + 1);
    samples.push(first);
    for i in 1..=steps {
        // Last point lands on the horizon exactly instead of accumulating step error.
        let t = if i == steps {
            horizon_hours
        } else {
            horizon_hours * i as f64 / steps as f64
        };
        samples.push(sample_at(model, initial_activity, half_life, t)?);
    }
    Ok(samples)
}

/// The sample whose time is closest to `elapsed_hours`; the earliest wins ties.
pub fn nearest_sample(samples: &[Sample], elapsed_hours: f64) -> Option<&Sample> {
    samples.iter().fold(None, |best: Option<&Sample>, s| match best {
        Some(b) if (b.elapsed_hours - elapsed_hours).abs() <= (s.elapsed_hours - elapsed_hours).abs() => {
            Some(b)
        }
        _ => Some(s),
    })
}

/// Summary of a decay run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub initial_activity: f64,
    pub current_activity: f64,
    pub minimum_activity: f64,
    pub elapsed_hours: f64,
    pub gamma: f64,
    pub percent_remaining: f64,
    pub percent_decayed: f64,
}

impl RunStats {
    /// Summarise a run from its samples. Returns `None` when there are none.
    pub fn from_samples(initial_activity: f64, samples: &[Sample]) -> Option<Self> {
        let last = samples.last()?;
        let minimum_activity = samples
            .iter()
            .map(|s| s.activity_mbq)
            .fold(f64::INFINITY, f64::min);
        Some(Self {
            initial_activity,
            current_activity: last.activity_mbq,
            minimum_activity,
            elapsed_hours: last.elapsed_hours,
            gamma: last.gamma,
            percent_remaining: last.percent_remaining(),
            percent_decayed: last.percent_decayed(),
        })
    }
}
