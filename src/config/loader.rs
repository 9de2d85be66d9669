//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings, imported rate brackets and registry records from YAML files.

use std::fs;
use std::path::Path;

use chrono::FixedOffset;

use crate::calculation::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::RateBracket;
use crate::store::Directory;

use super::types::{DirectoryConfig, EngineSettings, RateFile, RegionsConfig};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// builds the [`RateTable`] and checks that its brackets partition every
/// salary, and builds the registry [`Directory`].
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml       # Deployment name and day-boundary offset
/// ├── regions.yaml      # Regions referenced by companies and brackets
/// ├── directory.yaml    # Optional companies, employees and allowances
/// └── rates/
///     ├── 2024-03.yaml  # Importer output, one file per validity window
///     └── 2025-03.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use compensation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Loaded {} brackets", loader.rate_table().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    offset: FixedOffset,
    rates: RateTable,
    directory: Directory,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The UTC offset cannot be parsed
    /// - The rate brackets leave a gap or overlap in any window
    ///
    /// # Example
    ///
    /// ```no_run
    /// use compensation_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), compensation_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&engine_path)?;
        let offset = settings
            .utc_offset
            .parse::<FixedOffset>()
            .map_err(|e| EngineError::ConfigParseError {
                path: engine_path.display().to_string(),
                message: format!("invalid utc_offset '{}': {}", settings.utc_offset, e),
            })?;

        let regions = Self::load_yaml::<RegionsConfig>(&path.join("regions.yaml"))?;

        let rates = RateTable::new(Self::load_rates(&path.join("rates"))?);
        rates.check_partition()?;

        let directory_path = path.join("directory.yaml");
        let records = if directory_path.exists() {
            Self::load_yaml::<DirectoryConfig>(&directory_path)?
        } else {
            DirectoryConfig::default()
        };

        let mut directory = Directory::new();
        regions
            .regions
            .into_iter()
            .for_each(|region| directory.insert_region(region));
        records
            .companies
            .into_iter()
            .for_each(|company| directory.insert_company(company));
        records
            .employees
            .into_iter()
            .for_each(|employee| directory.insert_employee(employee));
        records
            .allowance_types
            .into_iter()
            .for_each(|allowance_type| directory.insert_allowance_type(allowance_type));
        records
            .allowances
            .into_iter()
            .for_each(|allowance| directory.insert_allowance(allowance));

        Ok(Self {
            settings,
            offset,
            rates,
            directory,
        })
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

    /// Loads every bracket from the rates directory, in file-name order.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateBracket>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        let mut brackets = Vec::new();
        for file in files {
            brackets.extend(Self::load_yaml::<RateFile>(&file)?.brackets);
        }
        Ok(brackets)
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the offset that defines calendar-day boundaries.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns the validated rate table.
    pub fn rate_table(&self) -> &RateTable {
        &self.rates
    }

    /// Returns the registry directory.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }
}
