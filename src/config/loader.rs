//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading practice
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{BenefitsConfig, PayrollTaxTable, PracticeAssumptions, PracticeConfig};

/// Loads and provides access to practice configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── practice.yaml       # MD baselines, trailing MD default, weeks per year, payroll lag
/// ├── benefits.yaml       # Benefit cost base year and amount
/// └── payroll_taxes/
///     └── 2025.yaml       # Employer payroll tax rates effective from this year
/// ```
///
/// # Example
///
/// ```no_run
/// use physician_comp_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let table = loader.tax_table(2025)?;
/// println!("Social security wage base: ${}", table.social_security_wage_base);
/// # Ok::<(), physician_comp_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PracticeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing, or no tax tables are present
    /// - Any file contains invalid YAML
    /// - Any assumption is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let assumptions = Self::load_yaml::<PracticeAssumptions>(&path.join("practice.yaml"))?;
        let benefits = Self::load_yaml::<BenefitsConfig>(&path.join("benefits.yaml"))?;
        let tax_tables = Self::load_tax_tables(&path.join("payroll_taxes"))?;

        let config = PracticeConfig::new(assumptions, benefits, tax_tables);
        config.validate()?;

        debug!(
            path = %path.display(),
            tax_tables = config.tax_tables().len(),
            "Loaded practice configuration"
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

    /// Loads all tax tables from the payroll_taxes directory.
    fn load_tax_tables(dir: &Path) -> EngineResult<Vec<PayrollTaxTable>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut tables = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                tables.push(Self::load_yaml::<PayrollTaxTable>(&path)?);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tax tables found)", dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying practice configuration.
    pub fn config(&self) -> &PracticeConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> PracticeConfig {
        self.config
    }

    /// Returns the practice assumptions.
    pub fn assumptions(&self) -> &PracticeAssumptions {
        self.config.assumptions()
    }

    /// Gets the payroll tax table effective for a year.
    ///
    /// Unlike [`PracticeConfig::tax_table_for`], this is strict: a year that
    /// predates every table is an error.
    pub fn tax_table(&self, year: i32) -> EngineResult<&PayrollTaxTable> {
        self.config
            .tax_tables()
            .iter()
            .rfind(|t| t.effective_year <= year)
            .ok_or(EngineError::TaxTableNotFound { year })
    }
}
