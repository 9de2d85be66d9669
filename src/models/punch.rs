//! Time-clock punch model.
//!
//! A punch is an immutable fact recorded by the time clock. Corrections are
//! re-emitted as a new fact under the same punch id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a time-clock punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    /// Start of the working day.
    ClockIn,
    /// End of the working day.
    ClockOut,
    /// Start of a break.
    BreakBegin,
    /// End of a break.
    BreakEnd,
}

/// A single timestamped time-clock event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Unique identifier for the punch.
    pub id: Uuid,
    /// The employee who punched.
    pub employee_id: String,
    /// What the punch records.
    #[serde(rename = "type")]
    pub kind: PunchKind,
    /// When the punch happened.
    pub timestamp: DateTime<Utc>,
}

impl PunchEvent {
    /// Creates a punch with a freshly generated id.
    pub fn new(employee_id: impl Into<String>, kind: PunchKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            kind,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_punch_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&PunchKind::ClockIn).unwrap(),
            "\"clock_in\""
        );
        assert_eq!(
            serde_json::to_string(&PunchKind::BreakBegin).unwrap(),
            "\"break_begin\""
        );
    }

    #[test]
    fn test_deserialize_punch_with_type_field() {
        let json = r#"{
            "id": "7f0c2a3e-4b8d-4a51-9d35-1f2b6f1e9a10",
            "employee_id": "emp_001",
            "type": "break_end",
            "timestamp": "2025-04-01T04:00:00Z"
        }"#;

        let punch: PunchEvent = serde_json::from_str(json).unwrap();
        assert_eq!(punch.kind, PunchKind::BreakEnd);
        assert_eq!(
            punch.timestamp,
            Utc.with_ymd_and_hms(2025, 4, 1, 4, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_new_generates_distinct_ids() {
        let at = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        let a = PunchEvent::new("emp_001", PunchKind::ClockIn, at);
        let b = PunchEvent::new("emp_001", PunchKind::ClockIn, at);
        assert_ne!(a.id, b.id);
    }
}
