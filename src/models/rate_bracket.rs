//! Statutory rate bracket models.
//!
//! Brackets are produced by the external rate importer and consumed
//! read-only. Each bracket covers an inclusive salary range and is valid for
//! an inclusive `(year, month)` window.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};

/// Which statutory scheme a bracket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateKind {
    /// Health insurance (with and without long-term-care surcharge).
    Health,
    /// Employees' pension insurance.
    Pension,
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateKind::Health => f.write_str("health"),
            RateKind::Pension => f.write_str("pension"),
        }
    }
}

/// A calendar month, ordered lexicographically by `(year, month)`.
///
/// # Example
///
/// ```
/// use compensation_engine::models::YearMonth;
///
/// assert!(YearMonth::new(2024, 12) < YearMonth::new(2025, 1));
/// assert!(YearMonth::new(2025, 3) > YearMonth::new(2025, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// Creates a year-month pair.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Returns the first day of the month.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] if the month is outside 1-12.
    pub fn first_day(&self) -> EngineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or(EngineError::InvalidPeriod {
            year: self.year,
            month: self.month,
        })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// The inclusive period during which a bracket applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidityWindow {
    /// First year of validity.
    pub from_year: i32,
    /// First month of validity.
    pub from_month: u32,
    /// Last year of validity.
    pub to_year: i32,
    /// Last month of validity.
    pub to_month: u32,
}

impl ValidityWindow {
    /// The first month of the window.
    pub fn from(&self) -> YearMonth {
        YearMonth::new(self.from_year, self.from_month)
    }

    /// The last month of the window.
    pub fn to(&self) -> YearMonth {
        YearMonth::new(self.to_year, self.to_month)
    }

    /// Returns true if `at` falls inside the window (both ends inclusive).
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::models::{ValidityWindow, YearMonth};
    ///
    /// let window = ValidityWindow { from_year: 2025, from_month: 3, to_year: 2026, to_month: 2 };
    /// assert!(window.covers(YearMonth::new(2025, 3)));
    /// assert!(window.covers(YearMonth::new(2026, 2)));
    /// assert!(!window.covers(YearMonth::new(2025, 2)));
    /// assert!(!window.covers(YearMonth::new(2026, 3)));
    /// ```
    pub fn covers(&self, at: YearMonth) -> bool {
        self.from() <= at && at <= self.to()
    }
}

/// The premium figures carried by a bracket, tagged by scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RatePayload {
    /// Health insurance premiums.
    Health {
        /// Total premium for employees outside the care band.
        total_no_care: Decimal,
        /// Employee half outside the care band.
        half_no_care: Decimal,
        /// Total premium inside the care band.
        total_with_care: Decimal,
        /// Employee half inside the care band.
        half_with_care: Decimal,
    },
    /// Pension premiums.
    Pension {
        /// Total premium.
        total: Decimal,
        /// Employee half.
        half: Decimal,
    },
}

impl RatePayload {
    /// The scheme this payload belongs to.
    pub fn kind(&self) -> RateKind {
        match self {
            RatePayload::Health { .. } => RateKind::Health,
            RatePayload::Pension { .. } => RateKind::Pension,
        }
    }
}

/// A `(total, employee share)` premium pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiumPair {
    /// Total premium, employer and employee combined.
    pub total: Decimal,
    /// The employee's share.
    pub employee: Decimal,
}

impl PremiumPair {
    /// The employer's share: total less the employee's share.
    pub fn employer(&self) -> Decimal {
        self.total - self.employee
    }
}

/// One statutory salary tier for a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBracket {
    /// The region the bracket applies to.
    pub region_id: String,
    /// Grade label, e.g. `"22"`.
    pub grade: String,
    /// Standard monthly remuneration the premiums are computed from.
    #[serde(default)]
    pub standard_monthly_amount: Decimal,
    /// Lowest salary in the range (inclusive).
    pub min_amount: Decimal,
    /// Highest whole salary in the range. Fractional amounts up to the next
    /// grade's `min_amount` also fall here. `None` means unbounded.
    #[serde(default, deserialize_with = "deserialize_upper_bound")]
    pub max_amount: Option<Decimal>,
    /// Validity period.
    #[serde(flatten)]
    pub window: ValidityWindow,
    /// Premium figures.
    #[serde(flatten)]
    pub payload: RatePayload,
}

impl RateBracket {
    /// The scheme this bracket belongs to.
    pub fn kind(&self) -> RateKind {
        self.payload.kind()
    }

    /// Returns true if `salary` lies within `[min_amount, max_amount + 1)`.
    ///
    /// Bounds are whole amounts, so the next grade starts at `max_amount + 1`
    /// and a fractional salary such as `62999.5` stays in the lower grade.
    pub fn contains_salary(&self, salary: Decimal) -> bool {
        salary >= self.min_amount
            && self
                .max_amount
                .is_none_or(|max| salary < max + Decimal::ONE)
    }

    /// Selects the premium pair for this bracket.
    ///
    /// `with_care` is ignored for pension brackets.
    pub fn premiums(&self, with_care: bool) -> PremiumPair {
        match &self.payload {
            RatePayload::Health {
                total_with_care,
                half_with_care,
                ..
            } if with_care => PremiumPair {
                total: *total_with_care,
                employee: *half_with_care,
            },
            RatePayload::Health {
                total_no_care,
                half_no_care,
                ..
            } => PremiumPair {
                total: *total_no_care,
                employee: *half_no_care,
            },
            RatePayload::Pension { total, half } => PremiumPair {
                total: *total,
                employee: *half,
            },
        }
    }
}

/// The importer writes the largest representable integer for the top
/// bracket; treat that sentinel (and anything above it) as "no upper bound".
fn deserialize_upper_bound<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let max = Option::<Decimal>::deserialize(deserializer)?;
    Ok(max.filter(|value| *value < Decimal::from(i64::MAX)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_health_bracket() {
        let yaml = r#"
region_id: tokyo
kind: health
grade: "22"
standard_monthly_amount: "300000"
min_amount: "210000"
max_amount: "309999"
from_year: 2025
from_month: 3
to_year: 2026
to_month: 2
total_no_care: "29730"
half_no_care: "14865"
total_with_care: "34500"
half_with_care: "17250"
"#;

        let bracket: RateBracket = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(bracket.kind(), RateKind::Health);
        assert_eq!(bracket.max_amount, Some(dec("309999")));
        assert_eq!(bracket.window.from(), YearMonth::new(2025, 3));
        assert_eq!(bracket.premiums(true).employee, dec("17250"));
        assert_eq!(bracket.premiums(false).employer(), dec("14865"));
    }

    #[test]
    fn test_importer_max_sentinel_is_unbounded() {
        let yaml = r#"
region_id: tokyo
kind: pension
grade: "32"
min_amount: "310000"
max_amount: 9223372036854775807
from_year: 2025
from_month: 3
to_year: 2026
to_month: 2
total: "118950"
half: "59475"
"#;

        let bracket: RateBracket = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(bracket.max_amount, None);
        assert!(bracket.contains_salary(dec("99999999999999999999")));
        assert!(!bracket.contains_salary(dec("309999")));
    }

    #[test]
    fn test_missing_max_is_unbounded() {
        let yaml = r#"
region_id: tokyo
kind: pension
grade: "32"
min_amount: "310000"
from_year: 2025
from_month: 3
to_year: 2026
to_month: 2
total: "118950"
half: "59475"
"#;

        let bracket: RateBracket = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(bracket.max_amount, None);
        assert_eq!(bracket.premiums(true).total, dec("118950"));
    }

    #[test]
    fn test_contains_salary_runs_up_to_next_grade() {
        let bracket = RateBracket {
            region_id: "tokyo".to_string(),
            grade: "2".to_string(),
            standard_monthly_amount: dec("68000"),
            min_amount: dec("63000"),
            max_amount: Some(dec("72999")),
            window: ValidityWindow {
                from_year: 2025,
                from_month: 3,
                to_year: 2026,
                to_month: 2,
            },
            payload: RatePayload::Pension {
                total: dec("12444"),
                half: dec("6222"),
            },
        };

        assert!(bracket.contains_salary(dec("63000")));
        assert!(bracket.contains_salary(dec("72999")));
        assert!(bracket.contains_salary(dec("72999.99")));
        assert!(!bracket.contains_salary(dec("62999")));
        assert!(!bracket.contains_salary(dec("62999.5")));
        assert!(!bracket.contains_salary(dec("73000")));
    }

    #[test]
    fn test_window_spanning_year_boundary() {
        let window = ValidityWindow {
            from_year: 2024,
            from_month: 3,
            to_year: 2025,
            to_month: 2,
        };
        assert!(window.covers(YearMonth::new(2024, 12)));
        assert!(window.covers(YearMonth::new(2025, 1)));
        assert!(!window.covers(YearMonth::new(2025, 12)));
        assert!(!window.covers(YearMonth::new(2024, 1)));
    }

    #[test]
    fn test_year_month_display_and_first_day() {
        assert_eq!(YearMonth::new(2025, 4).to_string(), "2025-04");
        assert_eq!(
            YearMonth::new(2025, 4).first_day().unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
        );
        assert!(matches!(
            YearMonth::new(2025, 13).first_day(),
            Err(EngineError::InvalidPeriod { year: 2025, month: 13 })
        ));
    }
}
