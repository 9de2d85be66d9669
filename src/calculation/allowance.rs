//! Monthly allowance aggregation.
//!
//! Each assignment is resolved against its allowance type before summing.
//! Assignments that cannot be resolved are logged and left out of the total
//! rather than failing the whole month.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::EngineError;
use crate::models::{AllowanceComponent, AllowanceLine};
use crate::store::Directory;

/// Resolves every allowance the employee holds for `(year, month)`.
///
/// Lines come back in assignment order. Assignments whose type is missing or
/// carries an unknown tag are skipped with a warning.
pub fn allowance_breakdown(
    directory: &Directory,
    employee_id: &str,
    year: i32,
    month: u32,
) -> Vec<AllowanceLine> {
    directory
        .allowances_for(employee_id, year, month)
        .filter_map(|allowance| {
            let resolved = directory
                .allowance_type(&allowance.allowance_type_id)
                .ok_or_else(|| EngineError::UnknownAllowanceType {
                    allowance_id: allowance.id.clone(),
                    tag: allowance.allowance_type_id.clone(),
                })
                .and_then(|allowance_type| {
                    AllowanceComponent::resolve(allowance, allowance_type)
                        .map(|component| (allowance_type, component))
                });

            match resolved {
                Ok((allowance_type, component)) => Some(AllowanceLine {
                    allowance_id: allowance.id.clone(),
                    name: allowance_type.name.clone(),
                    amount: component.contribution(),
                    component,
                }),
                Err(error) => {
                    warn!(
                        employee_id,
                        allowance_id = %allowance.id,
                        error = %error,
                        "Skipping unresolvable allowance"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Sums the employee's allowances for `(year, month)`.
///
/// Fixed allowances contribute their amount; commission allowances contribute
/// `amount * rate`. An employee without allowances totals zero.
pub fn total_allowance(directory: &Directory, employee_id: &str, year: i32, month: u32) -> Decimal {
    allowance_breakdown(directory, employee_id, year, month)
        .iter()
        .map(|line| line.amount)
        .sum()
}
