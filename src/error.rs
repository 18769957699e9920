//! Error types for the physician compensation engine.
//!
//! The allocation engine itself is total and never fails. These errors are
//! raised only while loading practice configuration or when a caller asks
//! the [`validation`](crate::validation) module to check a roster.

use thiserror::Error;

/// The main error type for the compensation engine.
///
/// # Example
///
/// ```
/// use physician_comp_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/practice.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/practice.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A practice assumption was outside its permitted range.
    #[error("Invalid practice assumption '{field}': {message}")]
    InvalidAssumption {
        /// The assumption that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// No payroll tax table is effective for the requested year.
    #[error("No payroll tax table effective for year {year}")]
    TaxTableNotFound {
        /// The year that was requested.
        year: i32,
    },

    /// A physician record failed roster validation.
    #[error("Invalid physician '{id}' field '{field}': {message}")]
    InvalidPhysician {
        /// The id of the offending physician.
        id: String,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
