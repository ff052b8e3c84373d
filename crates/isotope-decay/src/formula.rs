//! Human-readable decay formula with the caller's values substituted in.

use std::fmt;

use isotope_core::error::DomainError;
use isotope_core::traits::DecayModel;
use serde::{Deserialize, Serialize};

/// Which relation to present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationMode {
    /// Forward relation: activity after `hours`.
    Elapsed { hours: f64 },
    /// Inverse relation: time until the activity reaches `target_mbq`.
    Target { target_mbq: f64 },
}

/// The general formula, the substituted expression and its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaReport {
    pub formula: String,
    pub substitution: String,
    pub result: String,
    /// Decay constant used in the substitution, per hour.
    pub lambda: f64,
    /// Numeric value of the result (MBq or hours, depending on the mode).
    pub value: f64,
}

impl FormulaReport {
    pub fn build(
        model: &dyn DecayModel,
        mode: CalculationMode,
        initial_activity: f64,
        half_life: f64,
    ) -> Result<Self, DomainError> {
        let lambda = model.decay_constant(half_life)?;
        let report = match mode {
            CalculationMode::Elapsed { hours } => {
                let at = model.activity_at(initial_activity, hours, half_life)?;
                Self {
                    formula: "A(t) = A₀ · e^(-λt)".to_string(),
                    substitution: format!(
                        "A({hours:.2}) = {initial_activity:.2} · e^(-{lambda:.6} × {hours:.2})"
                    ),
                    result: format!("A({hours:.2}) = {at:.4} MBq"),
                    lambda,
                    value: at,
                }
            }
            CalculationMode::Target { target_mbq } => {
                let t = model.time_to_activity(initial_activity, target_mbq, half_life)?;
                Self {
                    formula: "t = -ln(Af / A₀) / λ".to_string(),
                    substitution: format!(
                        "t = -ln({target_mbq:.2} / {initial_activity:.2}) / {lambda:.6}"
                    ),
                    result: format!("t = {t:.4} h"),
                    lambda,
                    value: t,
                }
            }
        };
        Ok(report)
    }
}

impl fmt::Display for FormulaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.formula)?;
        writeln!(f, "{}", self.substitution)?;
        write!(f, "{}", self.result)
    }
}
