//! Employee, company and region records.
//!
//! Records reference each other by id only; lookups go through
//! [`crate::store::Directory`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A statutory region (prefecture) that rate brackets are published for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Unique identifier for the region.
    pub id: String,
    /// Display name, e.g. "Tokyo".
    pub name: String,
}

/// An employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier for the company.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The region whose rate brackets apply to the company's employees.
    #[serde(default)]
    pub region_id: Option<String>,
}

/// Represents an employee subject to premium and payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employer.
    pub company_id: String,
    /// Display name.
    pub name: String,
    /// Base monthly salary.
    pub monthly_salary: Decimal,
    /// The employee's date of birth.
    pub date_of_birth: NaiveDate,
}

impl Employee {
    /// Returns the employee's age in whole years on `date`.
    ///
    /// Dates before the date of birth yield zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use compensation_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     company_id: "comp_001".to_string(),
    ///     name: "Sato Hanako".to_string(),
    ///     monthly_salary: Decimal::from(300000),
    ///     date_of_birth: NaiveDate::from_ymd_opt(1985, 4, 15).unwrap(),
    /// };
    /// assert_eq!(employee.age_on(NaiveDate::from_ymd_opt(2025, 4, 14).unwrap()), 39);
    /// assert_eq!(employee.age_on(NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()), 40);
    /// ```
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        date.years_since(self.date_of_birth).unwrap_or(0)
    }
}
