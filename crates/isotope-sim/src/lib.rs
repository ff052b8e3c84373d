//! # isotope-sim — Real-time decay runs.
//!
//! Orchestration around the pure decay kernel:
//! - [`clock::Clock`] — wall-clock source, with a manual clock for replays and tests
//! - [`scale::TimeScale`] — simulated hours per real minute
//! - [`simulation::Simulation`] — run lifecycle, pause accounting and sample history

pub mod clock;
pub mod scale;
pub mod simulation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scale::TimeScale;
pub use simulation::{RunRecord, RunState, Simulation, SimulationParams};
