//! Calculation logic for the Compensation Calculation Engine.
//!
//! This module contains the calculation functions: work-record aggregation
//! from punches ([`aggregate_work_record`]), period-aware rate bracket
//! resolution ([`RateTable`]), health insurance and pension premiums,
//! monthly allowance totals, and payroll composition.

mod allowance;
mod health_insurance;
mod payroll;
mod pension;
mod rate_resolver;
mod time_clock;

#[cfg(test)]
pub(crate) mod test_support;

pub use allowance::{allowance_breakdown, total_allowance};
pub use health_insurance::{
    CARE_BAND_MAX_AGE, CARE_BAND_MIN_AGE, calculate_health_insurance, is_care_eligible,
};
pub use payroll::compose_payroll;
pub use pension::calculate_pension;
pub use rate_resolver::RateTable;
pub use time_clock::{aggregate_work_record, day_bounds, local_date};
