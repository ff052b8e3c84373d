//! # isotope-decay — Exponential decay engine.
//!
//! Implements the first-order decay law used throughout the toolkit:
//! - **Forward relation**: `A(t) = A₀ · e^(-λt)` with `λ = ln 2 / t½`.
//! - **Inverse relation**: `t = -ln(Af / A₀) / λ`, the time to reach a target activity.
//! - **Derived quantities**: gamma ratio, percent remaining, half-life counts.
//! - **Curves and reports**: uniform curve sampling, run statistics and
//!   substituted-formula reports built on top of any [`DecayModel`](isotope_core::traits::DecayModel).

pub mod curve;
pub mod engine;
pub mod formula;

pub use curve::{nearest_sample, sample_at, sample_curve, RunStats};
pub use engine::ExponentialDecay;
pub use formula::{CalculationMode, FormulaReport};
