//! Value types shared by the decay kernel, the simulation layer and front ends.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalogue::CatalogueEntry;
use crate::error::CatalogueError;

/// Immutable descriptor of a radiopharmaceutical.
///
/// The half-life is always finite and strictly positive; constructing a
/// descriptor with any other value is rejected rather than clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogueEntry", into = "CatalogueEntry")]
pub struct Radionuclide {
    pub(crate) name: String,
    pub(crate) half_life: f64,
    pub(crate) display_color: String,
    pub(crate) application: String,
    pub(crate) description: String,
}

impl Radionuclide {
    /// Build a descriptor, validating the name and half-life.
    ///
    /// # Examples
    ///
    /// ```
    /// use isotope_core::types::Radionuclide;
    /// let tc = Radionuclide::new("Tecnecio-99m", 6.01, "#3498DB", "Gammagrafía", "Diagnóstico de enfermedades cardíacas").unwrap();
    /// assert_eq!(tc.to_string(), "Tecnecio-99m (t½ = 6.01h)");
    /// assert!(Radionuclide::new("Bad", 0.0, "", "", "").is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        half_life: f64,
        display_color: impl Into<String>,
        application: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, CatalogueError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogueError::EmptyName);
        }
        if !half_life.is_finite() || half_life <= 0.0 {
            return Err(CatalogueError::InvalidHalfLife { name, half_life });
        }
        Ok(Self {
            name,
            half_life,
            display_color: display_color.into(),
            application: application.into(),
            description: description.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Half-life in hours.
    pub fn half_life(&self) -> f64 {
        self.half_life
    }

    /// Opaque colour tag used by renderers.
    pub fn display_color(&self) -> &str {
        &self.display_color
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Radionuclide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t½ = {}h)", self.name, self.half_life)
    }
}

impl TryFrom<CatalogueEntry> for Radionuclide {
    type Error = CatalogueError;

    fn try_from(entry: CatalogueEntry) -> Result<Self, Self::Error> {
        Self::new(
            entry.name,
            entry.half_life,
            entry.color,
            entry.application,
            entry.description,
        )
    }
}

impl From<Radionuclide> for CatalogueEntry {
    fn from(n: Radionuclide) -> Self {
        CatalogueEntry {
            name: n.name,
            half_life: n.half_life,
            color: n.display_color,
            application: n.application,
            description: n.description,
        }
    }
}

/// One point of a decay run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Simulated time since the start of the run, in hours.
    pub elapsed_hours: f64,
    /// Activity at `elapsed_hours`, in MBq.
    pub activity_mbq: f64,
    /// Fraction of the initial activity remaining, in `[0, 1]`.
    pub gamma: f64,
}

impl Sample {
    pub fn percent_remaining(&self) -> f64 {
        self.gamma * 100.0
    }

    pub fn percent_decayed(&self) -> f64 {
        100.0 - self.percent_remaining()
    }
}

/// How a run is set up. Both modes run for `horizon_hours` of simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SimulationMode {
    /// Plain decay over the horizon.
    Elapsed { horizon_hours: f64 },
    /// Decay over the horizon, tracking when the activity falls to `target_mbq`.
    TargetActivity { horizon_hours: f64, target_mbq: f64 },
}

impl SimulationMode {
    pub fn horizon_hours(&self) -> f64 {
        match *self {
            SimulationMode::Elapsed { horizon_hours }
            | SimulationMode::TargetActivity { horizon_hours, .. } => horizon_hours,
        }
    }

    pub fn target_mbq(&self) -> Option<f64> {
        match *self {
            SimulationMode::Elapsed { .. } => None,
            SimulationMode::TargetActivity { target_mbq, .. } => Some(target_mbq),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fluor() -> Radionuclide {
        Radionuclide::new("Fluor-18", 1.83, "#8E44AD", "PET", "Cancer diagnosis").unwrap()
    }

    #[test]
    fn display_includes_half_life() {
        assert_eq!(fluor().to_string(), "Fluor-18 (t½ = 1.83h)");
    }

    #[test]
    fn rejects_zero_half_life() {
        let err = Radionuclide::new("X", 0.0, "", "", "").unwrap_err();
        assert_eq!(
            err,
            CatalogueError::InvalidHalfLife {
                name: "X".into(),
                half_life: 0.0
            }
        );
    }

    #[test]
    fn rejects_negative_and_nan_half_life() {
        assert!(Radionuclide::new("X", -2.0, "", "", "").is_err());
        assert!(Radionuclide::new("X", f64::NAN, "", "", "").is_err());
        assert!(Radionuclide::new("X", f64::INFINITY, "", "", "").is_err());
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            Radionuclide::new("  ", 1.0, "", "", "").unwrap_err(),
            CatalogueError::EmptyName
        );
    }

    #[test]
    fn serde_roundtrip_uses_entry_shape() {
        let json = serde_json::to_value(fluor()).unwrap();
        assert_eq!(json["color"], "#8E44AD");
        assert_eq!(json["half_life"], 1.83);
        let back: Radionuclide = serde_json::from_value(json).unwrap();
        assert_eq!(back, fluor());
    }

    #[test]
    fn deserialize_rejects_invalid_half_life() {
        let json = r##"{"name":"X","half_life":-1.0,"color":"#000","application":"","description":""}"##;
        assert!(serde_json::from_str::<Radionuclide>(json).is_err());
    }

    #[test]
    fn sample_percentages() {
        let s = Sample {
            elapsed_hours: 1.83,
            activity_mbq: 50.0,
            gamma: 0.5,
        };
        assert_eq!(s.percent_remaining(), 50.0);
        assert_eq!(s.percent_decayed(), 50.0);
    }

    #[test]
    fn mode_serializes_with_tag() {
        let mode = SimulationMode::TargetActivity {
            horizon_hours: 24.0,
            target_mbq: 25.0,
        };
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(
            json,
            r#"{"mode":"target_activity","horizon_hours":24.0,"target_mbq":25.0}"#
        );
    }

    #[test]
    fn mode_accessors() {
        let elapsed = SimulationMode::Elapsed { horizon_hours: 3.0 };
        assert_eq!(elapsed.horizon_hours(), 3.0);
        assert_eq!(elapsed.target_mbq(), None);

        let target = SimulationMode::TargetActivity {
            horizon_hours: 12.0,
            target_mbq: 40.0,
        };
        assert_eq!(target.horizon_hours(), 12.0);
        assert_eq!(target.target_mbq(), Some(40.0));
    }
}
