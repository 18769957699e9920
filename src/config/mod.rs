//! Configuration loading and management for the compensation engine.
//!
//! This module loads practice assumptions from YAML files: medical-director
//! baselines, the trailing MD default, benefit costs and employer payroll
//! tax tables.
//!
//! # Example
//!
//! ```no_run
//! use physician_comp_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Shared MD baseline: ${}", config.assumptions().shared_md_baseline);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BenefitsConfig, PayrollTaxTable, PracticeAssumptions, PracticeConfig};
