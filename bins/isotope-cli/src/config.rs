//! CLI configuration loaded from an optional TOML file and `ISOTOPE_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use isotope_core::catalogue::{Catalogue, CatalogueEntry};
use isotope_core::constants::{DEFAULT_REAL_MINUTES, DEFAULT_TICK_INTERVAL_MS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level filter string (e.g. "info", "debug", "isotope_sim=trace").
    pub log_level: String,
    /// Log output format, "text" or "json".
    pub log_format: String,
    /// Real-time interval between simulation samples, in milliseconds.
    pub tick_interval_ms: u64,
    /// Default wall-clock length of a simulation run, in minutes.
    pub real_minutes: f64,
    /// Replaces the built-in catalogue when present.
    pub catalogue: Option<Vec<CatalogueEntry>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            real_minutes: DEFAULT_REAL_MINUTES,
            catalogue: None,
        }
    }
}

impl AppConfig {
    /// `<config_dir>/isotope/config.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("isotope").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist; the default path is optional.
    /// Environment variables override file values. The result is not
    /// validated; see [`with_overrides`](Self::with_overrides).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        match path {
            Some(p) => {
                builder = builder.add_source(::config::File::from(p.to_path_buf()).required(true));
            }
            None => {
                if let Some(p) = Self::default_path() {
                    builder = builder.add_source(::config::File::from(p).required(false));
                }
            }
        }
        builder = builder.add_source(::config::Environment::with_prefix("ISOTOPE").try_parsing(true));

        let cfg: AppConfig = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;
        Ok(cfg)
    }

    /// Apply command-line overrides, then validate the merged configuration.
    pub fn with_overrides(mut self, log_level: Option<String>, log_format: Option<String>) -> Result<Self> {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = log_format {
            self.log_format = format;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be positive");
        }
        if !(self.real_minutes > 0.0) {
            bail!("real_minutes must be positive, got {}", self.real_minutes);
        }
        if self.log_format != "text" && self.log_format != "json" {
            bail!("log_format must be \"text\" or \"json\", got {:?}", self.log_format);
        }
        Ok(())
    }

    /// The configured catalogue, or the built-in one.
    pub fn catalogue(&self) -> Result<Catalogue> {
        match &self.catalogue {
            Some(entries) => Catalogue::from_entries(entries.clone()).context("Invalid catalogue in configuration"),
            None => Ok(Catalogue::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.log_format, "text");
        assert_eq!(cfg.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.catalogue().unwrap(), Catalogue::builtin());
    }

    #[test]
    fn default_path_ends_with_config_toml() {
        if let Some(path) = AppConfig::default_path() {
            assert!(path.ends_with("isotope/config.toml"), "{path:?}");
        }
    }

    #[test]
    fn loads_file_with_custom_catalogue() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r##"
log_level = "debug"
tick_interval_ms = 250

[[catalogue]]
name = "Galio-68"
half_life = 1.13
color = "#1ABC9C"
application = "PET"

[[catalogue]]
name = "Lutecio-177"
half_life = 159.5
"##,
        );
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.tick_interval_ms, 250);
        assert_eq!(cfg.log_format, "text");

        let cat = cfg.catalogue().unwrap();
        assert_eq!(cat.names(), vec!["Galio-68", "Lutecio-177"]);
        assert_eq!(cat.require("Lutecio-177").unwrap().half_life(), 159.5);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn rejects_invalid_catalogue() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
[[catalogue]]
name = "Broken"
half_life = 0.0
"#,
        );
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert!(cfg.catalogue().is_err());
    }

    #[test]
    fn cli_flag_fixes_bad_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "log_format = \"xml\"\n");
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.log_format, "xml");
        assert!(cfg.clone().with_overrides(None, None).is_err());

        let cfg = cfg.with_overrides(Some("debug".into()), Some("json".into())).unwrap();
        assert_eq!(cfg.log_format, "json");
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn rejects_bad_values() {
        let cfg = AppConfig {
            tick_interval_ms: 0,
            ..AppConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = AppConfig {
            log_format: "xml".into(),
            ..AppConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = AppConfig {
            real_minutes: -1.0,
            ..AppConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
