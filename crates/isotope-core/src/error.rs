//! Error types for the Isotope toolkit.
use thiserror::Error;

/// Mathematically undefined input to a decay computation.
///
/// Raised synchronously and exactly once per call. Never retried by the
/// kernel; callers map it to a user-facing message at their input boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("half-life must be positive, got {0}")] NonPositiveHalfLife(f64),
    #[error("target activity must be positive, got {0}")] NonPositiveTarget(f64),
    #[error("too many curve steps: {steps} (max {max})")] TooManySteps { steps: usize, max: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogueError {
    #[error("catalogue is empty")] Empty,
    #[error("radionuclide name is empty")] EmptyName,
    #[error("duplicate radionuclide: {0}")] DuplicateName(String),
    #[error("unknown radionuclide: {0}")] UnknownNuclide(String),
    #[error("invalid half-life for {name}: {half_life}")] InvalidHalfLife { name: String, half_life: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("initial activity must be positive, got {0}")] NonPositiveInitialActivity(f64),
    #[error("simulated duration must be positive, got {0}")] NonPositiveHorizon(f64),
    #[error("real duration must be positive, got {0}")] NonPositiveRealDuration(f64),
    #[error("target activity {target} must be below initial activity {initial}")] TargetNotBelowInitial { target: f64, initial: f64 },
    #[error("time scale must be positive, got {0} simulated hours per minute")] InvalidTimeScale(f64),
    #[error("no simulation is running")] NotRunning,
    #[error("simulation is not paused")] NotPaused,
    #[error("a simulation is already running")] AlreadyRunning,
    #[error("no simulation parameters set")] NoParameters,
    #[error(transparent)] Domain(#[from] DomainError),
}
