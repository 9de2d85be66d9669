//! Allowance models.
//!
//! Allowance types are company-defined; assignments attach an amount to an
//! employee for one `(year, month)`. The type tag is stored as free text and
//! resolved once into [`AllowanceComponent`] before any arithmetic happens.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The closed set of allowance kinds the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceKind {
    /// A flat amount.
    Fixed,
    /// A percentage of a sales amount.
    Commission,
}

impl FromStr for AllowanceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fixed" => Ok(AllowanceKind::Fixed),
            "commission" => Ok(AllowanceKind::Commission),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for AllowanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowanceKind::Fixed => f.write_str("fixed"),
            AllowanceKind::Commission => f.write_str("commission"),
        }
    }
}

/// A company-defined allowance type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceType {
    /// Unique identifier for the type.
    pub id: String,
    /// The company that defined it.
    pub company_id: String,
    /// Display name, e.g. "Commuting".
    pub name: String,
    /// Raw type tag as stored upstream (`"fixed"` or `"commission"`).
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Default commission rate for commission types.
    #[serde(default)]
    pub commission_rate: Decimal,
}

/// An allowance assigned to an employee for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// Unique identifier for the assignment.
    pub id: String,
    /// The employee receiving the allowance.
    pub employee_id: String,
    /// The allowance type.
    pub allowance_type_id: String,
    /// Flat amount, or the sales amount a commission is taken from.
    pub amount: Decimal,
    /// Per-employee commission rate. Absent or zero falls back to the type default.
    #[serde(default)]
    pub commission_rate: Option<Decimal>,
    /// Applicable year.
    pub year: i32,
    /// Applicable month.
    pub month: u32,
}

/// An allowance after its type tag has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllowanceComponent {
    /// Contributes `amount` directly.
    Fixed {
        /// The flat amount.
        amount: Decimal,
    },
    /// Contributes `amount × rate`.
    Commission {
        /// The base amount.
        amount: Decimal,
        /// The effective commission rate.
        rate: Decimal,
    },
}

impl AllowanceComponent {
    /// Resolves an assignment against its type.
    ///
    /// Fails with [`EngineError::UnknownAllowanceType`] if the type tag is not
    /// one of the known kinds.
    ///
    /// # Examples
    ///
    /// ```
    /// use compensation_engine::models::{Allowance, AllowanceComponent, AllowanceType};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let sales = AllowanceType {
    ///     id: "at_sales".to_string(),
    ///     company_id: "comp_001".to_string(),
    ///     name: "Sales commission".to_string(),
    ///     type_tag: "commission".to_string(),
    ///     description: String::new(),
    ///     commission_rate: Decimal::from_str("0.05").unwrap(),
    /// };
    /// let assignment = Allowance {
    ///     id: "al_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     allowance_type_id: "at_sales".to_string(),
    ///     amount: Decimal::from(100000),
    ///     commission_rate: Some(Decimal::from_str("0.1").unwrap()),
    ///     year: 2025,
    ///     month: 4,
    /// };
    ///
    /// let component = AllowanceComponent::resolve(&assignment, &sales).unwrap();
    /// assert_eq!(component.contribution(), Decimal::from(10000));
    /// ```
    pub fn resolve(allowance: &Allowance, allowance_type: &AllowanceType) -> EngineResult<Self> {
        let kind = AllowanceKind::from_str(&allowance_type.type_tag).map_err(|tag| {
            EngineError::UnknownAllowanceType {
                allowance_id: allowance.id.clone(),
                tag,
            }
        })?;

        Ok(match kind {
            AllowanceKind::Fixed => AllowanceComponent::Fixed {
                amount: allowance.amount,
            },
            AllowanceKind::Commission => {
                let rate = allowance
                    .commission_rate
                    .filter(|rate| !rate.is_zero())
                    .unwrap_or(allowance_type.commission_rate);
                AllowanceComponent::Commission {
                    amount: allowance.amount,
                    rate,
                }
            }
        })
    }

    /// The component's contribution to the allowance total.
    pub fn contribution(&self) -> Decimal {
        match self {
            AllowanceComponent::Fixed { amount } => *amount,
            AllowanceComponent::Commission { amount, rate } => amount * rate,
        }
    }

    /// The resolved kind.
    pub fn kind(&self) -> AllowanceKind {
        match self {
            AllowanceComponent::Fixed { .. } => AllowanceKind::Fixed,
            AllowanceComponent::Commission { .. } => AllowanceKind::Commission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn allowance_type(tag: &str, default_rate: &str) -> AllowanceType {
        AllowanceType {
            id: "at_001".to_string(),
            company_id: "comp_001".to_string(),
            name: "Test".to_string(),
            type_tag: tag.to_string(),
            description: String::new(),
            commission_rate: dec(default_rate),
        }
    }

    fn assignment(amount: &str, rate: Option<&str>) -> Allowance {
        Allowance {
            id: "al_001".to_string(),
            employee_id: "emp_001".to_string(),
            allowance_type_id: "at_001".to_string(),
            amount: dec(amount),
            commission_rate: rate.map(dec),
            year: 2025,
            month: 4,
        }
    }

    #[test]
    fn test_commission_uses_override() {
        let component = AllowanceComponent::resolve(
            &assignment("100000", Some("0.1")),
            &allowance_type("commission", "0.05"),
        )
        .unwrap();
        assert_eq!(component.contribution(), dec("10000"));
    }

    #[test]
    fn test_commission_without_override_uses_default() {
        let component = AllowanceComponent::resolve(
            &assignment("100000", None),
            &allowance_type("commission", "0.05"),
        )
        .unwrap();
        assert_eq!(component.contribution(), dec("5000"));
    }

    #[test]
    fn test_commission_with_zero_override_uses_default() {
        let component = AllowanceComponent::resolve(
            &assignment("100000", Some("0")),
            &allowance_type("commission", "0.05"),
        )
        .unwrap();
        assert_eq!(
            component,
            AllowanceComponent::Commission {
                amount: dec("100000"),
                rate: dec("0.05"),
            }
        );
        assert_eq!(component.contribution(), dec("5000"));
    }

    #[test]
    fn test_fixed_ignores_rates() {
        let component = AllowanceComponent::resolve(
            &assignment("20000", Some("0.5")),
            &allowance_type("fixed", "0.05"),
        )
        .unwrap();
        assert_eq!(component.kind(), AllowanceKind::Fixed);
        assert_eq!(component.contribution(), dec("20000"));
    }

    #[test]
    fn test_unknown_tag_is_typed_error() {
        let result =
            AllowanceComponent::resolve(&assignment("1000", None), &allowance_type("bonus", "0"));
        match result {
            Err(EngineError::UnknownAllowanceType { allowance_id, tag }) => {
                assert_eq!(allowance_id, "al_001");
                assert_eq!(tag, "bonus");
            }
            other => panic!("Expected UnknownAllowanceType, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_allowance_type_with_type_field() {
        let yaml = r#"
id: at_commute
company_id: comp_001
name: Commuting
type: fixed
"#;
        let parsed: AllowanceType = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.type_tag, "fixed");
        assert!(parsed.commission_rate.is_zero());
    }
}
