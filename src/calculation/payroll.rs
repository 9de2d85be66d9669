//! Payroll composition.
//!
//! Combines base salary, allowances and the employee's share of health
//! insurance and pension into gross and net pay for one month.

use tracing::info;

use crate::error::EngineResult;
use crate::models::{PayrollResult, PayrollTotals};
use crate::store::Directory;

use super::allowance::allowance_breakdown;
use super::health_insurance::calculate_health_insurance;
use super::pension::calculate_pension;
use super::rate_resolver::RateTable;

/// Composes the payroll for an employee and month.
///
/// Both premium calculations use the requested period, so a payroll for a
/// month in an earlier fiscal year uses that year's brackets.
///
/// # Errors
///
/// Any error from [`calculate_health_insurance`] or [`calculate_pension`] is
/// returned unchanged. Allowance problems never fail the payroll.
pub fn compose_payroll(
    directory: &Directory,
    rates: &RateTable,
    employee_id: &str,
    year: i32,
    month: u32,
) -> EngineResult<PayrollResult> {
    let health = calculate_health_insurance(directory, rates, employee_id, year, month)?;
    let pension = calculate_pension(directory, rates, employee_id, year, month)?;
    let employee = directory.employee(employee_id)?;

    let allowances = allowance_breakdown(directory, employee_id, year, month);
    let total_allowance = allowances.iter().map(|line| line.amount).sum();

    let totals = PayrollTotals::compose(
        employee.monthly_salary,
        total_allowance,
        health.employee_premium,
        pension.employee_premium,
    );

    info!(
        employee_id,
        year,
        month,
        gross_salary = %totals.gross_salary,
        net_salary = %totals.net_salary,
        "Payroll composed"
    );

    Ok(PayrollResult {
        employee_name: employee.name.clone(),
        year,
        month,
        allowances,
        totals,
    })
}
