//! Calculation result models for the Compensation Calculation Engine.
//!
//! These are the values exposed to callers: premium splits for each
//! statutory scheme and the composed payroll.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AllowanceComponent;

/// Health insurance premiums for one employee and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInsuranceResult {
    /// The employee's display name.
    pub employee_name: String,
    /// The employer's display name.
    pub company_name: String,
    /// The region the bracket was resolved for.
    pub region_name: String,
    /// Grade label of the resolved bracket.
    pub grade: String,
    /// Standard monthly remuneration of the resolved bracket.
    pub standard_monthly_amount: Decimal,
    /// Total premium.
    pub total_premium: Decimal,
    /// Employee share.
    pub employee_premium: Decimal,
    /// Employer share.
    pub employer_premium: Decimal,
    /// Age in whole years on the first day of the month.
    pub age: u32,
    /// Whether the long-term-care surcharge applies.
    pub with_care: bool,
}

/// Pension premiums for one employee and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionResult {
    /// The employee's display name.
    pub employee_name: String,
    /// The employer's display name.
    pub company_name: String,
    /// The region the bracket was resolved for.
    pub region_name: String,
    /// Grade label of the resolved bracket.
    pub grade: String,
    /// Standard monthly remuneration of the resolved bracket.
    pub standard_monthly_amount: Decimal,
    /// Total premium.
    pub total_premium: Decimal,
    /// Employee share.
    pub employee_premium: Decimal,
    /// Employer share.
    pub employer_premium: Decimal,
    /// Age in whole years on the first day of the month.
    pub age: u32,
}

/// One allowance's contribution to a payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceLine {
    /// The assignment id.
    pub allowance_id: String,
    /// The allowance type's display name.
    pub name: String,
    /// The resolved component.
    pub component: AllowanceComponent,
    /// The amount added to gross salary.
    pub amount: Decimal,
}

/// The gross/net arithmetic of a payroll.
///
/// # Example
///
/// ```
/// use compensation_engine::models::PayrollTotals;
/// use rust_decimal::Decimal;
///
/// let totals = PayrollTotals::compose(
///     Decimal::from(300000),
///     Decimal::from(20000),
///     Decimal::from(15000),
///     Decimal::from(27000),
/// );
/// assert_eq!(totals.gross_salary, Decimal::from(320000));
/// assert_eq!(totals.total_deductions, Decimal::from(42000));
/// assert_eq!(totals.net_salary, Decimal::from(278000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Base monthly salary.
    pub base_salary: Decimal,
    /// Sum of allowance contributions.
    pub total_allowance: Decimal,
    /// Base salary plus allowances.
    pub gross_salary: Decimal,
    /// Employee share of health insurance.
    pub employee_insurance: Decimal,
    /// Employee share of pension.
    pub employee_pension: Decimal,
    /// Insurance plus pension.
    pub total_deductions: Decimal,
    /// Gross salary less deductions.
    pub net_salary: Decimal,
}

impl PayrollTotals {
    /// Composes gross, deductions and net from their inputs.
    pub fn compose(
        base_salary: Decimal,
        total_allowance: Decimal,
        employee_insurance: Decimal,
        employee_pension: Decimal,
    ) -> Self {
        let gross_salary = base_salary + total_allowance;
        let total_deductions = employee_insurance + employee_pension;
        Self {
            base_salary,
            total_allowance,
            gross_salary,
            employee_insurance,
            employee_pension,
            total_deductions,
            net_salary: gross_salary - total_deductions,
        }
    }
}

/// A composed payroll for one employee and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The employee's display name.
    pub employee_name: String,
    /// Payroll year.
    pub year: i32,
    /// Payroll month.
    pub month: u32,
    /// The allowances that made up `total_allowance`.
    pub allowances: Vec<AllowanceLine>,
    /// Salary, allowance and deduction totals.
    #[serde(flatten)]
    pub totals: PayrollTotals,
}
