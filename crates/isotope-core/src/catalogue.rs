//! Immutable radionuclide catalogue.
//!
//! A [`Catalogue`] is built once at startup, either from the built-in table
//! or from configuration, and handed to whoever needs lookups. It is never
//! mutated after construction.

use serde::{Deserialize, Serialize};

use crate::error::CatalogueError;
use crate::types::Radionuclide;

/// Serialized form of a radionuclide descriptor as it appears in config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub name: String,
    /// Half-life in hours.
    pub half_life: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub description: String,
}

/// `(name, half-life in hours, colour, application, description)`.
const BUILTIN: [(&str, f64, &str, &str, &str); 5] = [
    ("Fluor-18", 1.83, "#8E44AD", "PET (Tomografía por Emisión de Positrones)", "Usado en diagnóstico de cáncer"),
    ("Tecnecio-99m", 6.01, "#3498DB", "Gammagrafía", "Diagnóstico de enfermedades cardíacas"),
    ("Yodo-131", 192.5, "#2ECC71", "Tratamiento de tiroides", "Terapia de cáncer de tiroides"),
    ("Carbono-11", 0.33, "#E74C3C", "Investigación metabólica", "Estudios de metabolismo cerebral"),
    ("Nitrógeno-13", 0.17, "#F39C12", "Medicina nuclear", "Estudios cardiovasculares"),
];

/// Ordered, name-unique set of radionuclides.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    nuclides: Vec<Radionuclide>,
}

impl Catalogue {
    /// Build a catalogue, rejecting empty input and duplicate names.
    pub fn new(nuclides: Vec<Radionuclide>) -> Result<Self, CatalogueError> {
        if nuclides.is_empty() {
            return Err(CatalogueError::Empty);
        }
        for (i, n) in nuclides.iter().enumerate() {
            if nuclides[..i].iter().any(|prev| prev.name() == n.name()) {
                return Err(CatalogueError::DuplicateName(n.name().to_string()));
            }
        }
        Ok(Self { nuclides })
    }

    /// Validate and build a catalogue from configuration entries.
    pub fn from_entries(entries: Vec<CatalogueEntry>) -> Result<Self, CatalogueError> {
        let nuclides = entries
            .into_iter()
            .map(Radionuclide::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(nuclides)
    }

    /// The radiopharmaceuticals shipped with the toolkit.
    ///
    /// # Examples
    ///
    /// ```
    /// use isotope_core::catalogue::Catalogue;
    /// let cat = Catalogue::builtin();
    /// assert_eq!(cat.require("Fluor-18").unwrap().half_life(), 1.83);
    /// ```
    pub fn builtin() -> Self {
        let nuclides = BUILTIN
            .iter()
            .map(|&(name, half_life, color, application, description)| Radionuclide {
                name: name.to_string(),
                half_life,
                display_color: color.to_string(),
                application: application.to_string(),
                description: description.to_string(),
            })
            .collect();
        Self { nuclides }
    }

    pub fn get(&self, name: &str) -> Option<&Radionuclide> {
        self.nuclides.iter().find(|n| n.name() == name)
    }

    /// Like [`get`](Self::get) but reports unknown names as an error.
    pub fn require(&self, name: &str) -> Result<&Radionuclide, CatalogueError> {
        self.get(name)
            .ok_or_else(|| CatalogueError::UnknownNuclide(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Radionuclide> {
        self.nuclides.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.nuclides.iter().map(Radionuclide::name).collect()
    }

    pub fn len(&self) -> usize {
        self.nuclides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nuclides.is_empty()
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, half_life: f64) -> CatalogueEntry {
        CatalogueEntry {
            name: name.into(),
            half_life,
            color: "#FFFFFF".into(),
            application: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn builtin_has_five_entries_in_order() {
        let cat = Catalogue::builtin();
        assert_eq!(
            cat.names(),
            vec!["Fluor-18", "Tecnecio-99m", "Yodo-131", "Carbono-11", "Nitrógeno-13"]
        );
    }

    #[test]
    fn builtin_half_lives() {
        let cat = Catalogue::builtin();
        assert_eq!(cat.require("Tecnecio-99m").unwrap().half_life(), 6.01);
        assert_eq!(cat.require("Yodo-131").unwrap().half_life(), 192.5);
        assert_eq!(cat.require("Nitrógeno-13").unwrap().half_life(), 0.17);
    }

    #[test]
    fn builtin_all_positive() {
        assert!(Catalogue::builtin().iter().all(|n| n.half_life() > 0.0));
    }

    #[test]
    fn builtin_table_passes_validation() {
        let checked = BUILTIN
            .iter()
            .map(|&(name, half_life, color, app, desc)| Radionuclide::new(name, half_life, color, app, desc))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(Catalogue::new(checked).unwrap(), Catalogue::builtin());
    }

    #[test]
    fn builtin_descriptors() {
        let cat = Catalogue::builtin();
        let f18 = cat.require("Fluor-18").unwrap();
        assert_eq!(f18.application(), "PET (Tomografía por Emisión de Positrones)");
        assert_eq!(f18.description(), "Usado en diagnóstico de cáncer");
        assert_eq!(f18.display_color(), "#8E44AD");
        assert_eq!(cat.require("Tecnecio-99m").unwrap().application(), "Gammagrafía");
        assert_eq!(
            cat.require("Nitrógeno-13").unwrap().description(),
            "Estudios cardiovasculares"
        );
    }

    #[test]
    fn unknown_name_is_error() {
        let cat = Catalogue::builtin();
        assert!(cat.get("Galio-68").is_none());
        assert_eq!(
            cat.require("Galio-68").unwrap_err(),
            CatalogueError::UnknownNuclide("Galio-68".into())
        );
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Catalogue::new(vec![]).unwrap_err(), CatalogueError::Empty);
        assert_eq!(Catalogue::from_entries(vec![]).unwrap_err(), CatalogueError::Empty);
    }

    #[test]
    fn rejects_duplicates() {
        let err = Catalogue::from_entries(vec![entry("Galio-68", 1.13), entry("Galio-68", 1.13)])
            .unwrap_err();
        assert_eq!(err, CatalogueError::DuplicateName("Galio-68".into()));
    }

    #[test]
    fn from_entries_rejects_bad_half_life() {
        let err = Catalogue::from_entries(vec![entry("Galio-68", 1.13), entry("Bad", -3.0)])
            .unwrap_err();
        assert!(matches!(err, CatalogueError::InvalidHalfLife { .. }));
    }

    #[test]
    fn from_entries_preserves_order() {
        let cat = Catalogue::from_entries(vec![entry("B", 2.0), entry("A", 1.0)]).unwrap();
        assert_eq!(cat.names(), vec!["B", "A"]);
        assert_eq!(cat.len(), 2);
        assert!(!cat.is_empty());
    }

    #[test]
    fn entry_defaults_optional_fields() {
        let e: CatalogueEntry = serde_json::from_str(r#"{"name":"Galio-68","half_life":1.13}"#).unwrap();
        assert_eq!(e.color, "");
        assert_eq!(e.half_life, 1.13);
    }
}
