//! Core data models for the Compensation Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allowance;
mod calculation_result;
mod employee;
mod punch;
mod rate_bracket;
mod work_record;

pub use allowance::{Allowance, AllowanceComponent, AllowanceKind, AllowanceType};
pub use calculation_result::{
    AllowanceLine, HealthInsuranceResult, PayrollResult, PayrollTotals, PensionResult,
};
pub use employee::{Company, Employee, Region};
pub use punch::{PunchEvent, PunchKind};
pub use rate_bracket::{PremiumPair, RateBracket, RateKind, RatePayload, ValidityWindow, YearMonth};
pub use work_record::WorkRecord;
