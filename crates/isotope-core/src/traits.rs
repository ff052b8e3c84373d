//! Trait interfaces for the Isotope toolkit.
//!
//! - [`DecayModel`] — decay math kernel (isotope-decay implements)

use crate::error::DomainError;

/// Pure computation of first-order radioactive decay quantities.
///
/// Times are in hours, activities in MBq. Implementations hold no state
/// between calls, so a single instance may be shared freely across threads.
/// A [`DomainError`] is returned only for mathematically undefined inputs.
pub trait DecayModel: Send + Sync {
    /// Activity remaining after `elapsed_time` hours.
    ///
    /// `A(t) = A₀ · e^(-λt)` with `λ = ln 2 / half_life`. Returns
    /// `initial_activity` exactly when `elapsed_time` is zero. Negative
    /// elapsed times are evaluated as written (the curve extended backwards);
    /// callers should not rely on that.
    fn activity_at(
        &self,
        initial_activity: f64,
        elapsed_time: f64,
        half_life: f64,
    ) -> Result<f64, DomainError>;

    /// Hours needed for the activity to fall from `initial_activity` to `target_activity`.
    ///
    /// `t = -ln(Af / A₀) / λ`. A target at or above the initial activity
    /// needs no time and yields `0.0`. A non-positive target is an error.
    fn time_to_activity(
        &self,
        initial_activity: f64,
        target_activity: f64,
        half_life: f64,
    ) -> Result<f64, DomainError>;

    /// Decay constant `λ = ln 2 / half_life`, per hour.
    fn decay_constant(&self, half_life: f64) -> Result<f64, DomainError>;

    /// Fraction of the initial activity remaining, clamped to `[0, 1]`.
    ///
    /// Returns `0.0` when `initial_activity` is zero instead of failing.
    fn gamma_ratio(&self, current_activity: f64, initial_activity: f64) -> f64;

    /// [`gamma_ratio`](Self::gamma_ratio) as a percentage.
    fn percent_remaining(&self, current_activity: f64, initial_activity: f64) -> f64 {
        self.gamma_ratio(current_activity, initial_activity) * 100.0
    }

    /// Number of half-lives contained in `elapsed_time`.
    fn half_lives_elapsed(&self, elapsed_time: f64, half_life: f64) -> Result<f64, DomainError>;

    /// Activity after `n` half-lives, `A₀ · 0.5ⁿ`. Defined for any real `n`.
    fn activity_after_half_lives(&self, initial_activity: f64, n: f64) -> f64;
}
