//! Daily work record model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The aggregate of one employee's punches for one calendar day.
///
/// A work record is derived data: it is always rebuilt from the day's punches
/// and replaces any previous record for the same `(employee_id, date)` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar day, in the engine's configured offset.
    pub date: NaiveDate,
    /// The first clock-in of the day, if any.
    pub clock_in: Option<DateTime<Utc>>,
    /// The last clock-out of the day, if any.
    pub clock_out: Option<DateTime<Utc>>,
    /// Accumulated matched break time.
    pub break_minutes: i64,
    /// Time between clock-in and clock-out less breaks. Zero when incomplete.
    pub work_minutes: i64,
}
