//! Rate bracket resolution.
//!
//! This module provides [`RateTable`], the read-only index over imported
//! statutory brackets, and the period-aware lookup that picks the single
//! bracket applying to a salary in a given month.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{RateBracket, RateKind, ValidityWindow, YearMonth};

/// An immutable collection of rate brackets indexed by region and kind.
///
/// # Example
///
/// ```
/// use compensation_engine::calculation::RateTable;
/// use compensation_engine::models::{RateBracket, RateKind, RatePayload, ValidityWindow};
/// use rust_decimal::Decimal;
///
/// let bracket = RateBracket {
///     region_id: "tokyo".to_string(),
///     grade: "1".to_string(),
///     standard_monthly_amount: Decimal::from(88000),
///     min_amount: Decimal::ZERO,
///     max_amount: None,
///     window: ValidityWindow { from_year: 2025, from_month: 3, to_year: 2026, to_month: 2 },
///     payload: RatePayload::Pension { total: Decimal::from(16104), half: Decimal::from(8052) },
/// };
/// let table = RateTable::new(vec![bracket]);
///
/// let found = table
///     .resolve("tokyo", Decimal::from(250000), 2025, 4, RateKind::Pension)
///     .unwrap();
/// assert_eq!(found.grade, "1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    brackets: HashMap<(String, RateKind), Vec<RateBracket>>,
}

impl RateTable {
    /// Builds a table from imported brackets.
    ///
    /// Brackets are kept newest window first, then by ascending `min_amount`.
    pub fn new(brackets: Vec<RateBracket>) -> Self {
        let mut index: HashMap<(String, RateKind), Vec<RateBracket>> = HashMap::new();
        for bracket in brackets {
            index
                .entry((bracket.region_id.clone(), bracket.kind()))
                .or_default()
                .push(bracket);
        }
        for list in index.values_mut() {
            list.sort_by(|a, b| {
                b.window
                    .from()
                    .cmp(&a.window.from())
                    .then_with(|| a.min_amount.cmp(&b.min_amount))
            });
        }
        Self { brackets: index }
    }

    /// All brackets for a region and kind, newest window first.
    pub fn brackets(&self, region_id: &str, kind: RateKind) -> &[RateBracket] {
        self.brackets
            .get(&(region_id.to_string(), kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of brackets across all regions.
    pub fn len(&self) -> usize {
        self.brackets.values().map(Vec::len).sum()
    }

    /// Returns true if the table holds no brackets.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Finds the bracket applying to `monthly_salary` in `(year, month)`.
    ///
    /// A bracket applies when its validity window covers the month and its
    /// salary range contains the salary. Should several apply, the one whose
    /// window starts latest wins.
    ///
    /// # Errors
    ///
    /// * [`EngineError::InvalidPeriod`] if `month` is outside 1-12.
    /// * [`EngineError::RegionNotConfigured`] if the region has no brackets of `kind`.
    /// * [`EngineError::NoMatchingBracket`] if no bracket covers both salary and month.
    pub fn resolve(
        &self,
        region_id: &str,
        monthly_salary: Decimal,
        year: i32,
        month: u32,
        kind: RateKind,
    ) -> EngineResult<&RateBracket> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod { year, month });
        }

        let candidates = self.brackets(region_id, kind);
        if candidates.is_empty() {
            return Err(EngineError::RegionNotConfigured {
                region_id: region_id.to_string(),
                kind,
            });
        }

        let at = YearMonth::new(year, month);
        candidates
            .iter()
            .filter(|b| b.window.covers(at) && b.contains_salary(monthly_salary))
            // max_by_key keeps the last maximum; the table is sorted newest first,
            // so reverse to keep the first listed on equal starts.
            .rev()
            .max_by_key(|b| b.window.from())
            .ok_or_else(|| EngineError::NoMatchingBracket {
                region_id: region_id.to_string(),
                kind,
                salary: monthly_salary,
                year,
                month,
            })
    }

    /// Checks that, for every region, kind and validity window, the salary
    /// ranges partition `[0, +inf)`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRateTable`] describing the first gap,
    /// overlap or bounded top bracket found.
    pub fn check_partition(&self) -> EngineResult<()> {
        for ((region_id, kind), brackets) in &self.brackets {
            let mut by_window: BTreeMap<(YearMonth, YearMonth), Vec<&RateBracket>> =
                BTreeMap::new();
            for bracket in brackets {
                by_window
                    .entry((bracket.window.from(), bracket.window.to()))
                    .or_default()
                    .push(bracket);
            }

            for ((from, to), mut tier) in by_window {
                let invalid = |message: String| EngineError::InvalidRateTable {
                    region_id: region_id.clone(),
                    message: format!("{} brackets {}..{}: {}", kind, from, to, message),
                };

                if from > to {
                    return Err(invalid("window ends before it starts".to_string()));
                }

                tier.sort_by(|a, b| a.min_amount.cmp(&b.min_amount));
                let mut expected_min = Decimal::ZERO;
                let last = tier.len() - 1;
                for (i, bracket) in tier.iter().enumerate() {
                    if bracket.min_amount != expected_min {
                        return Err(invalid(format!(
                            "grade {} starts at {}, expected {}",
                            bracket.grade, bracket.min_amount, expected_min
                        )));
                    }
                    match bracket.max_amount {
                        Some(max) if i == last => {
                            return Err(invalid(format!(
                                "top grade {} is bounded at {}",
                                bracket.grade, max
                            )));
                        }
                        Some(max) if max < bracket.min_amount => {
                            return Err(invalid(format!(
                                "grade {} ends at {} below its start {}",
                                bracket.grade, max, bracket.min_amount
                            )));
                        }
                        Some(max) => expected_min = max + Decimal::ONE,
                        None if i != last => {
                            return Err(invalid(format!(
                                "grade {} is unbounded but is not the top grade",
                                bracket.grade
                            )));
                        }
                        None => {}
                    }
                }
            }
        }
        Ok(())
    }

    /// The distinct validity windows present for a region and kind.
    pub fn windows(&self, region_id: &str, kind: RateKind) -> Vec<ValidityWindow> {
        let mut windows: Vec<ValidityWindow> = Vec::new();
        for bracket in self.brackets(region_id, kind) {
            if !windows.contains(&bracket.window) {
                windows.push(bracket.window);
            }
        }
        windows
    }
}
