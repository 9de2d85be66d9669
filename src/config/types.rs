//! Configuration types for the compensation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::{Allowance, AllowanceType, Company, Employee, RateBracket, Region};

/// Engine-wide settings from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// A human-readable name for this deployment.
    pub name: String,
    /// The UTC offset that defines calendar-day boundaries, e.g. `"+09:00"`.
    pub utc_offset: String,
}

/// Regions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionsConfig {
    /// Every region brackets may refer to.
    pub regions: Vec<Region>,
}

/// A rate file written by the importer, one per validity window.
#[derive(Debug, Clone, Deserialize)]
pub struct RateFile {
    /// The brackets in this file. Health and pension may be mixed.
    pub brackets: Vec<RateBracket>,
}

/// Registry records from the optional `directory.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    /// Employers.
    #[serde(default)]
    pub companies: Vec<Company>,
    /// Employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Company-defined allowance types.
    #[serde(default)]
    pub allowance_types: Vec<AllowanceType>,
    /// Monthly allowance assignments.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
}
