//! Health insurance premium calculation.
//!
//! Premiums come from the bracket resolved for the employee's region and
//! salary. Employees inside the long-term-care band pay the with-care
//! figures.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{HealthInsuranceResult, RateKind, YearMonth};
use crate::store::Directory;

use super::rate_resolver::RateTable;

/// First age (inclusive) at which the long-term-care surcharge applies.
pub const CARE_BAND_MIN_AGE: u32 = 40;

/// Age (exclusive) at which the long-term-care surcharge stops.
pub const CARE_BAND_MAX_AGE: u32 = 65;

/// Returns true if an employee of `age` pays the long-term-care surcharge.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::is_care_eligible;
///
/// assert!(!is_care_eligible(39));
/// assert!(is_care_eligible(40));
/// assert!(is_care_eligible(64));
/// assert!(!is_care_eligible(65));
/// ```
pub fn is_care_eligible(age: u32) -> bool {
    (CARE_BAND_MIN_AGE..CARE_BAND_MAX_AGE).contains(&age)
}

/// Calculates the health insurance premiums for an employee and month.
///
/// The employee's age is taken on the first day of the month. The bracket is
/// resolved for the region of the employee's company.
///
/// # Errors
///
/// * Not-found errors for dangling employee, company or region references.
/// * [`crate::error::EngineError::RegionMissing`] if the company has no region.
/// * Any error from [`RateTable::resolve`].
pub fn calculate_health_insurance(
    directory: &Directory,
    rates: &RateTable,
    employee_id: &str,
    year: i32,
    month: u32,
) -> EngineResult<HealthInsuranceResult> {
    let as_of = YearMonth::new(year, month).first_day()?;
    let placement = directory.placement(employee_id)?;
    let employee = placement.employee;

    let age = employee.age_on(as_of);
    let with_care = is_care_eligible(age);

    let bracket = rates.resolve(
        &placement.region.id,
        employee.monthly_salary,
        year,
        month,
        RateKind::Health,
    )?;
    let premiums = bracket.premiums(with_care);

    debug!(
        employee_id,
        region_id = %placement.region.id,
        grade = %bracket.grade,
        age,
        with_care,
        "Health insurance bracket resolved"
    );

    Ok(HealthInsuranceResult {
        employee_name: employee.name.clone(),
        company_name: placement.company.name.clone(),
        region_name: placement.region.name.clone(),
        grade: bracket.grade.clone(),
        standard_monthly_amount: bracket.standard_monthly_amount,
        total_premium: premiums.total,
        employee_premium: premiums.employee,
        employer_premium: premiums.employer(),
        age,
        with_care,
    })
}
