//! Toolkit constants. Times are in hours, activities in MBq.

pub use std::f64::consts::LN_2;

/// Interval between simulation samples in real time, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Default real duration of a simulation run, in minutes.
pub const DEFAULT_REAL_MINUTES: f64 = 1.0;

/// Absolute tolerance used when comparing derived floating-point quantities.
pub const FLOAT_TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of intervals in a sampled curve.
pub const MAX_CURVE_STEPS: usize = 1_000_000;

/// Selectable time scales as `(label, simulated hours per real minute)`.
///
/// # Examples
///
/// ```
/// use isotope_core::constants::TIME_SCALE_PRESETS;
/// assert_eq!(TIME_SCALE_PRESETS.len(), 4);
/// assert_eq!(TIME_SCALE_PRESETS[0], ("5 hours", 5.0));
/// ```
pub const TIME_SCALE_PRESETS: [(&str, f64); 4] = [
    ("5 hours", 5.0),
    ("10 hours", 10.0),
    ("15 hours", 15.0),
    ("20 hours", 20.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_increasing_and_positive() {
        for pair in TIME_SCALE_PRESETS.windows(2) {
            assert!(pair[0].1 > 0.0);
            assert!(pair[1].1 > pair[0].1, "presets not increasing at {}", pair[1].0);
        }
    }

    #[test]
    fn ln2_matches_std() {
        assert!((LN_2 - 2f64.ln()).abs() < FLOAT_TOLERANCE);
    }
}
