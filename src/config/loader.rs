//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! tables from YAML files.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::calculation::validate_bracket_table;
use crate::error::{EngineError, EngineResult};
use crate::models::RegionCode;

use super::types::{EngineConfig, EngineMetadata, RateConfig, RegionsConfig};

/// Loads and provides access to the payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates every tax table it finds and answers date-based rate lookups.
///
/// # Directory Structure
///
/// ```text
/// config/mx/
/// ├── engine.yaml        # Table metadata
/// ├── regions.yaml       # IMSS subdelegación codes
/// └── rates/
///     └── 2024-01-01.yaml  # Rates effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use nomina_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/mx").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let rates = loader.rates_for(date).unwrap();
/// println!("{} ISR brackets", rates.isr.brackets.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A bracket table is out of order, non-adjacent or discontinuous
    /// - A region code is malformed or duplicated
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let regions = Self::load_yaml::<RegionsConfig>(&path.join("regions.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        let config = EngineConfig::new(metadata, regions.regions, rates);
        Self::from_config(config)
    }

    /// Wraps an in-memory configuration after validating it.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        if config.rates().is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: "rates (no rate sets configured)".to_string(),
            });
        }
        Self::validate_regions(config.regions())?;
        for rates in config.rates() {
            validate_bracket_table(&rates.isr.brackets, rates.isr.continuity_tolerance).map_err(
                |e| EngineError::ConfigParseError {
                    path: format!("rates/{}.yaml", rates.effective_date),
                    message: e.to_string(),
                },
            )?;
        }

        tracing::debug!(
            regions = config.regions().len(),
            rate_sets = config.rates().len(),
            "Payroll configuration loaded"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfig>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    fn validate_regions(regions: &[RegionCode]) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for region in regions {
            let well_formed =
                region.code.len() == 2 && region.code.chars().all(|c| c.is_ascii_digit());
            if !well_formed {
                return Err(EngineError::ConfigParseError {
                    path: "regions.yaml".to_string(),
                    message: format!("region code '{}' must be two digits", region.code),
                });
            }
            if !seen.insert(region.code.as_str()) {
                return Err(EngineError::ConfigParseError {
                    path: "regions.yaml".to_string(),
                    message: format!("duplicate region code '{}'", region.code),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the region table.
    pub fn regions(&self) -> &[RegionCode] {
        self.config.regions()
    }

    /// Looks up a region name by its two-digit code.
    pub fn region_name(&self, code: &str) -> Option<&str> {
        self.regions()
            .iter()
            .find(|r| r.code == code)
            .map(|r| r.name.as_str())
    }

    /// Gets the most recent rate set effective on or before `date`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RatesNotFound`] when every rate set starts
    /// after `date`.
    pub fn rates_for(&self, date: NaiveDate) -> EngineResult<&RateConfig> {
        self.config
            .rates()
            .iter()
            .rev()
            .find(|rc| rc.effective_date <= date)
            .ok_or(EngineError::RatesNotFound { date })
    }

    /// Returns the newest rate set.
    pub fn latest_rates(&self) -> &RateConfig {
        self.config
            .rates()
            .last()
            .expect("load and from_config reject an empty rate list")
    }
}
