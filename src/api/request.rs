//! Request types for the compensation engine API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PunchKind;

/// Request body for `POST /punches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRequest {
    /// The employee punching.
    pub employee_id: String,
    /// The punch type.
    #[serde(rename = "type")]
    pub kind: PunchKind,
    /// When the punch happened.
    pub timestamp: DateTime<Utc>,
}

/// Request body for `PUT /punches/:id`, an approved correction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmendPunchRequest {
    /// The corrected punch type.
    #[serde(rename = "type")]
    pub kind: PunchKind,
    /// The corrected timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Query string for the monthly calculation endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}
