//! # isotope-core
//! Foundation types, catalogue and traits for the Isotope decay toolkit.

pub mod catalogue;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
