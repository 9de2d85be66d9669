//! Employees' pension premium calculation.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{PensionResult, RateKind, YearMonth};
use crate::store::Directory;

use super::rate_resolver::RateTable;

/// Calculates the pension premiums for an employee and month.
///
/// Resolution follows [`super::calculate_health_insurance`]; pension brackets
/// carry a single premium pair, so age only appears in the result.
///
/// # Errors
///
/// The same as [`super::calculate_health_insurance`].
pub fn calculate_pension(
    directory: &Directory,
    rates: &RateTable,
    employee_id: &str,
    year: i32,
    month: u32,
) -> EngineResult<PensionResult> {
    let as_of = YearMonth::new(year, month).first_day()?;
    let placement = directory.placement(employee_id)?;
    let employee = placement.employee;

    let bracket = rates.resolve(
        &placement.region.id,
        employee.monthly_salary,
        year,
        month,
        RateKind::Pension,
    )?;
    let premiums = bracket.premiums(false);

    debug!(
        employee_id,
        region_id = %placement.region.id,
        grade = %bracket.grade,
        "Pension bracket resolved"
    );

    Ok(PensionResult {
        employee_name: employee.name.clone(),
        company_name: placement.company.name.clone(),
        region_name: placement.region.name.clone(),
        grade: bracket.grade.clone(),
        standard_monthly_amount: bracket.standard_monthly_amount,
        total_premium: premiums.total,
        employee_premium: premiums.employee,
        employer_premium: premiums.employer(),
        age: employee.age_on(as_of),
    })
}
