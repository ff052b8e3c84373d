//! Stateful decay run driven by a [`Clock`].
//!
//! The decay kernel stays pure; this module owns everything a front end
//! needs around it: validated run parameters, the wall-clock to simulated
//! time mapping, pause accounting and the append-only sample history.
//! Callers poll [`Simulation::tick`] on their own cadence.

use std::time::Duration;

use chrono::{DateTime, Local};
use isotope_core::constants::FLOAT_TOLERANCE;
use isotope_core::error::{DomainError, SimulationError};
use isotope_core::traits::DecayModel;
use isotope_core::types::{Radionuclide, Sample, SimulationMode};
use isotope_decay::curve::{nearest_sample, sample_at, RunStats};
use isotope_decay::engine::ExponentialDecay;
use isotope_decay::formula::{CalculationMode, FormulaReport};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::scale::TimeScale;

/// User-supplied parameters of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub nuclide: Radionuclide,
    /// Activity at the start of the run, in MBq.
    pub initial_activity: f64,
    pub mode: SimulationMode,
    /// Wall-clock minutes the whole run should take.
    pub real_minutes: f64,
}

impl SimulationParams {
    /// Validate the parameters and return the simulated duration of the run.
    pub fn horizon_hours(&self) -> Result<f64, SimulationError> {
        if !(self.initial_activity > 0.0) {
            return Err(SimulationError::NonPositiveInitialActivity(self.initial_activity));
        }
        if !(self.real_minutes > 0.0) {
            return Err(SimulationError::NonPositiveRealDuration(self.real_minutes));
        }
        let horizon_hours = self.mode.horizon_hours();
        if !horizon_hours.is_finite() || horizon_hours <= 0.0 {
            return Err(SimulationError::NonPositiveHorizon(horizon_hours));
        }
        if let Some(target_mbq) = self.mode.target_mbq() {
            if !(target_mbq > 0.0) {
                return Err(DomainError::NonPositiveTarget(target_mbq).into());
            }
            if target_mbq >= self.initial_activity {
                return Err(SimulationError::TargetNotBelowInitial {
                    target: target_mbq,
                    initial: self.initial_activity,
                });
            }
        }
        Ok(horizon_hours)
    }

    /// Simulated hours until the activity falls to the target, in target mode.
    ///
    /// May exceed the horizon, in which case the run ends above the target.
    pub fn target_hours(&self, model: &dyn DecayModel) -> Result<Option<f64>, SimulationError> {
        let Some(target_mbq) = self.mode.target_mbq() else {
            return Ok(None);
        };
        let hours = model.time_to_activity(self.initial_activity, target_mbq, self.nuclide.half_life())?;
        Ok(Some(hours))
    }
}

/// Lifecycle of a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// No run in progress; history is empty.
    Idle,
    Running,
    Paused,
    /// Stopped by the caller before reaching the horizon.
    Stopped,
    /// Reached the horizon.
    Finished,
}

/// Validated parameters together with what was derived from them.
#[derive(Debug, Clone, PartialEq)]
struct RunPlan {
    params: SimulationParams,
    horizon_hours: f64,
    target_hours: Option<f64>,
    scale: TimeScale,
}

/// Serializable snapshot of a run, suitable for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub params: SimulationParams,
    pub state: RunState,
    pub started_at: Option<DateTime<Local>>,
    pub horizon_hours: f64,
    pub hours_per_minute: f64,
    /// Predicted crossing of the target activity, in target mode.
    pub target_hours: Option<f64>,
    /// Time of the first recorded sample at or below the target.
    pub target_reached_at: Option<f64>,
    pub samples: Vec<Sample>,
    pub stats: Option<RunStats>,
}

/// A single decay run, polled by the caller.
pub struct Simulation<C: Clock = SystemClock, M: DecayModel = ExponentialDecay> {
    clock: C,
    model: M,
    state: RunState,
    plan: Option<RunPlan>,
    samples: Vec<Sample>,
    target_reached_at: Option<f64>,
    started_at: Option<DateTime<Local>>,
    origin: Duration,
    paused_total: Duration,
    paused_since: Option<Duration>,
}

impl Simulation {
    /// A simulation on the wall clock with the exponential decay model.
    pub fn system() -> Self {
        Self::new(SystemClock::new(), ExponentialDecay::new())
    }
}

impl<C: Clock, M: DecayModel> Simulation<C, M> {
    pub fn new(clock: C, model: M) -> Self {
        Self {
            clock,
            model,
            state: RunState::Idle,
            plan: None,
            samples: Vec::new(),
            target_reached_at: None,
            started_at: None,
            origin: Duration::ZERO,
            paused_total: Duration::ZERO,
            paused_since: None,
        }
    }

    /// Validate `params` and begin a new run, seeding the history with `t = 0`.
    pub fn start(&mut self, params: SimulationParams) -> Result<Sample, SimulationError> {
        if self.is_active() {
            return Err(SimulationError::AlreadyRunning);
        }
        let horizon_hours = params.horizon_hours()?;
        let target_hours = params.target_hours(&self.model)?;
        let scale = TimeScale::fit(horizon_hours, params.real_minutes)?;
        self.plan = Some(RunPlan {
            params,
            horizon_hours,
            target_hours,
            scale,
        });
        self.begin()
    }

    /// Start again with the parameters of the previous run.
    pub fn restart(&mut self) -> Result<Sample, SimulationError> {
        if self.is_active() {
            return Err(SimulationError::AlreadyRunning);
        }
        if self.plan.is_none() {
            return Err(SimulationError::NoParameters);
        }
        self.begin()
    }

    fn begin(&mut self) -> Result<Sample, SimulationError> {
        let plan = self.plan.as_ref().ok_or(SimulationError::NoParameters)?;
        let first = sample_at(
            &self.model,
            plan.params.initial_activity,
            plan.params.nuclide.half_life(),
            0.0,
        )?;

        info!(
            nuclide = plan.params.nuclide.name(),
            initial_mbq = plan.params.initial_activity,
            horizon_hours = plan.horizon_hours,
            hours_per_minute = plan.scale.hours_per_minute(),
            "simulation started"
        );

        self.samples.clear();
        self.samples.push(first);
        self.target_reached_at = None;
        self.started_at = Some(Local::now());
        self.origin = self.clock.now();
        self.paused_total = Duration::ZERO;
        self.paused_since = None;
        self.state = RunState::Running;
        Ok(first)
    }

    /// Record the next sample if the run is active and not paused.
    ///
    /// Simulated time is clamped to the horizon; the sample that reaches it
    /// finishes the run. Returns `None` when there is nothing to record.
    pub fn tick(&mut self) -> Result<Option<Sample>, SimulationError> {
        if self.state != RunState::Running {
            return Ok(None);
        }
        let Some(plan) = self.plan.as_ref() else {
            return Err(SimulationError::NoParameters);
        };

        let real = self
            .clock
            .now()
            .saturating_sub(self.origin)
            .saturating_sub(self.paused_total);
        let elapsed = plan.scale.simulated_hours(real).min(plan.horizon_hours);
        let sample = sample_at(
            &self.model,
            plan.params.initial_activity,
            plan.params.nuclide.half_life(),
            elapsed,
        )?;
        self.samples.push(sample);
        if let Some(target_mbq) = plan.params.mode.target_mbq() {
            if self.target_reached_at.is_none() && sample.activity_mbq <= target_mbq + FLOAT_TOLERANCE {
                self.target_reached_at = Some(sample.elapsed_hours);
                info!(
                    elapsed_hours = sample.elapsed_hours,
                    target_mbq,
                    "target activity reached"
                );
            }
        }
        debug!(
            elapsed_hours = sample.elapsed_hours,
            activity_mbq = sample.activity_mbq,
            gamma = sample.gamma,
            "tick"
        );

        if elapsed >= plan.horizon_hours {
            self.state = RunState::Finished;
            info!(
                activity_mbq = sample.activity_mbq,
                gamma = sample.gamma,
                decayed_pct = sample.percent_decayed(),
                "simulation finished"
            );
        }
        Ok(Some(sample))
    }

    pub fn pause(&mut self) -> Result<(), SimulationError> {
        if self.state != RunState::Running {
            return Err(SimulationError::NotRunning);
        }
        self.paused_since = Some(self.clock.now());
        self.state = RunState::Paused;
        debug!("simulation paused");
        Ok(())
    }

    /// Resume a paused run; paused wall time does not count as simulated time.
    pub fn resume(&mut self) -> Result<(), SimulationError> {
        if self.state != RunState::Paused {
            return Err(SimulationError::NotPaused);
        }
        if let Some(since) = self.paused_since.take() {
            self.paused_total += self.clock.now().saturating_sub(since);
        }
        self.state = RunState::Running;
        debug!("simulation resumed");
        Ok(())
    }

    /// End the run early, keeping its history.
    pub fn stop(&mut self) -> Result<(), SimulationError> {
        if !self.is_active() {
            return Err(SimulationError::NotRunning);
        }
        self.paused_since = None;
        self.state = RunState::Stopped;
        info!(samples = self.samples.len(), "simulation stopped");
        Ok(())
    }

    /// Drop the history but keep the parameters for [`restart`](Self::restart).
    pub fn clear(&mut self) {
        self.samples.clear();
        self.target_reached_at = None;
        self.started_at = None;
        self.paused_since = None;
        self.state = RunState::Idle;
    }

    /// Forget everything, including the parameters.
    pub fn reset(&mut self) {
        self.clear();
        self.plan = None;
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Running or paused.
    pub fn is_active(&self) -> bool {
        matches!(self.state, RunState::Running | RunState::Paused)
    }

    pub fn params(&self) -> Option<&SimulationParams> {
        self.plan.as_ref().map(|p| &p.params)
    }

    pub fn horizon_hours(&self) -> Option<f64> {
        self.plan.as_ref().map(|p| p.horizon_hours)
    }

    /// Predicted simulated time of the target crossing, in target mode.
    pub fn target_hours(&self) -> Option<f64> {
        self.plan.as_ref().and_then(|p| p.target_hours)
    }

    /// Simulated time of the first recorded sample at or below the target.
    pub fn target_reached_at(&self) -> Option<f64> {
        self.target_reached_at
    }

    pub fn scale(&self) -> Option<TimeScale> {
        self.plan.as_ref().map(|p| p.scale)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    /// Wall time left until the run reaches its horizon.
    pub fn remaining_real(&self) -> Option<Duration> {
        let plan = self.plan.as_ref()?;
        let done = self.samples.last().map_or(0.0, |s| s.elapsed_hours);
        Some(plan.scale.real_duration(plan.horizon_hours - done))
    }

    pub fn stats(&self) -> Option<RunStats> {
        let plan = self.plan.as_ref()?;
        RunStats::from_samples(plan.params.initial_activity, &self.samples)
    }

    /// The recorded sample closest to `elapsed_hours`.
    pub fn nearest(&self, elapsed_hours: f64) -> Option<&Sample> {
        nearest_sample(&self.samples, elapsed_hours)
    }

    /// Substituted formula for the current parameters.
    pub fn formula(&self) -> Result<FormulaReport, SimulationError> {
        let plan = self.plan.as_ref().ok_or(SimulationError::NoParameters)?;
        let mode = match plan.params.mode {
            SimulationMode::Elapsed { horizon_hours } => CalculationMode::Elapsed { hours: horizon_hours },
            SimulationMode::TargetActivity { target_mbq, .. } => CalculationMode::Target { target_mbq },
        };
        Ok(FormulaReport::build(
            &self.model,
            mode,
            plan.params.initial_activity,
            plan.params.nuclide.half_life(),
        )?)
    }

    /// Snapshot of the run for export.
    pub fn record(&self) -> Option<RunRecord> {
        let plan = self.plan.as_ref()?;
        Some(RunRecord {
            params: plan.params.clone(),
            state: self.state,
            started_at: self.started_at,
            horizon_hours: plan.horizon_hours,
            hours_per_minute: plan.scale.hours_per_minute(),
            target_hours: plan.target_hours,
            target_reached_at: self.target_reached_at,
            samples: self.samples.clone(),
            stats: self.stats(),
        })
    }
}
