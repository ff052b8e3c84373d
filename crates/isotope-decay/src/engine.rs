//! Decay engine implementing the [`DecayModel`] trait.
//!
//! Closed-form first-order decay in `f64`. Every operation is a pure
//! evaluation; domain guards run before any arithmetic so undefined inputs
//! surface as [`DomainError`] rather than NaN or infinities.

use isotope_core::constants::LN_2;
use isotope_core::error::DomainError;
use isotope_core::traits::DecayModel;

/// The production decay model: `A(t) = A₀ · e^(-λt)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialDecay;

impl ExponentialDecay {
    /// Create a new ExponentialDecay.
    pub fn new() -> Self {
        Self
    }
}

/// `λ = ln 2 / half_life`, rejecting non-positive and NaN half-lives.
fn lambda_for(half_life: f64) -> Result<f64, DomainError> {
    // Written as a negated comparison so NaN is rejected too.
    if !(half_life > 0.0) {
        return Err(DomainError::NonPositiveHalfLife(half_life));
    }
    Ok(LN_2 / half_life)
}

impl DecayModel for ExponentialDecay {
    fn activity_at(
        &self,
        initial_activity: f64,
        elapsed_time: f64,
        half_life: f64,
    ) -> Result<f64, DomainError> {
        let lambda = lambda_for(half_life)?;
        Ok(initial_activity * (-lambda * elapsed_time).exp())
    }

    fn time_to_activity(
        &self,
        initial_activity: f64,
        target_activity: f64,
        half_life: f64,
    ) -> Result<f64, DomainError> {
        let lambda = lambda_for(half_life)?;
        if !(target_activity > 0.0) {
            return Err(DomainError::NonPositiveTarget(target_activity));
        }
        if target_activity >= initial_activity {
            return Ok(0.0);
        }
        Ok(-(target_activity / initial_activity).ln() / lambda)
    }

    fn decay_constant(&self, half_life: f64) -> Result<f64, DomainError> {
        lambda_for(half_life)
    }

    fn gamma_ratio(&self, current_activity: f64, initial_activity: f64) -> f64 {
        if initial_activity == 0.0 {
            return 0.0;
        }
        let ratio = current_activity / initial_activity;
        if ratio.is_nan() {
            return 0.0;
        }
        ratio.clamp(0.0, 1.0)
    }

    fn half_lives_elapsed(&self, elapsed_time: f64, half_life: f64) -> Result<f64, DomainError> {
        lambda_for(half_life)?;
        Ok(elapsed_time / half_life)
    }

    fn activity_after_half_lives(&self, initial_activity: f64, n: f64) -> f64 {
        initial_activity * 0.5f64.powf(n)
    }
}
