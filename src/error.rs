//! Error types for the Compensation Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing work records,
//! statutory premiums and payroll.

use thiserror::Error;
use uuid::Uuid;

use crate::models::RateKind;

/// Broad classification of an [`EngineError`].
///
/// Callers (such as the HTTP layer) use the category to decide how an error
/// is surfaced without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A referenced employee, company, region or punch does not exist.
    NotFound,
    /// Rate tables or configuration are incomplete or inconsistent.
    Configuration,
    /// Upstream data is malformed. Never fatal to aggregation.
    DataQuality,
    /// The caller supplied an impossible value.
    InvalidInput,
}

/// The main error type for the Compensation Calculation Engine.
///
/// # Example
///
/// ```
/// use compensation_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
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

    /// The employee reference does not resolve.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The unresolved employee id.
        employee_id: String,
    },

    /// The company reference does not resolve.
    #[error("Company not found: {company_id}")]
    CompanyNotFound {
        /// The unresolved company id.
        company_id: String,
    },

    /// The region reference does not resolve.
    #[error("Region not found: {region_id}")]
    RegionNotFound {
        /// The unresolved region id.
        region_id: String,
    },

    /// The punch to amend does not exist.
    #[error("Punch not found: {punch_id}")]
    PunchNotFound {
        /// The unresolved punch id.
        punch_id: Uuid,
    },

    /// The requested month is not a calendar month.
    #[error("Invalid period: {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// The employee's company has no region assigned.
    #[error("Company '{company_id}' has no region assigned")]
    RegionMissing {
        /// The company lacking a region.
        company_id: String,
    },

    /// The region has no brackets at all for the requested kind.
    #[error("No {kind} rate brackets configured for region '{region_id}'")]
    RegionNotConfigured {
        /// The region id.
        region_id: String,
        /// The requested bracket kind.
        kind: RateKind,
    },

    /// No bracket covers both the salary and the requested period.
    #[error(
        "No {kind} bracket for region '{region_id}' covers salary {salary} in {year}-{month:02}"
    )]
    NoMatchingBracket {
        /// The region id.
        region_id: String,
        /// The requested bracket kind.
        kind: RateKind,
        /// The monthly salary that was looked up.
        salary: rust_decimal::Decimal,
        /// The as-of year.
        year: i32,
        /// The as-of month.
        month: u32,
    },

    /// Imported brackets violate the partition invariant.
    #[error("Invalid rate table for region '{region_id}': {message}")]
    InvalidRateTable {
        /// The region whose brackets are inconsistent.
        region_id: String,
        /// A description of the gap or overlap.
        message: String,
    },

    /// An allowance references a type tag the engine does not know.
    #[error("Unknown allowance type '{tag}' on allowance '{allowance_id}'")]
    UnknownAllowanceType {
        /// The allowance assignment id.
        allowance_id: String,
        /// The unrecognised type tag (or missing type id).
        tag: String,
    },
}

impl EngineError {
    /// Returns the broad category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::EmployeeNotFound { .. }
            | EngineError::CompanyNotFound { .. }
            | EngineError::RegionNotFound { .. }
            | EngineError::PunchNotFound { .. } => ErrorCategory::NotFound,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::RegionMissing { .. }
            | EngineError::RegionNotConfigured { .. }
            | EngineError::NoMatchingBracket { .. }
            | EngineError::InvalidRateTable { .. } => ErrorCategory::Configuration,
            EngineError::UnknownAllowanceType { .. } => ErrorCategory::DataQuality,
            EngineError::InvalidPeriod { .. } => ErrorCategory::InvalidInput,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
