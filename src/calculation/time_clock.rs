//! Time-clock aggregation.
//!
//! This module turns one employee's punches for one calendar day into a
//! [`WorkRecord`]. Punches are raw facts from hardware and manual entry, so
//! aggregation never fails: incomplete or out-of-order sequences degrade to a
//! partial record and are logged for follow-up.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc};
use tracing::warn;

use crate::models::{PunchEvent, PunchKind, WorkRecord};

/// Returns the calendar date of `timestamp` in the given offset.
///
/// Day boundaries are always computed against an explicit offset, never the
/// process-local time zone.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::local_date;
/// use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
///
/// let jst = FixedOffset::east_opt(9 * 3600).unwrap();
/// let late_utc = Utc.with_ymd_and_hms(2025, 4, 1, 16, 30, 0).unwrap();
/// assert_eq!(local_date(late_utc, jst), NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
/// ```
pub fn local_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

/// Returns the half-open UTC range `[start, end)` covering `date` in the
/// given offset.
///
/// A timestamp `t` satisfies `start <= t < end` exactly when
/// `local_date(t, offset) == date`.
pub fn day_bounds(date: NaiveDate, offset: FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
    let local_midnight = date.and_time(NaiveTime::MIN);
    let start = (local_midnight - TimeDelta::seconds(i64::from(offset.local_minus_utc()))).and_utc();
    (start, start + TimeDelta::days(1))
}

/// Aggregates a day's punches into a work record.
///
/// The scan tracks the first clock-in, the last clock-out and a single open
/// break start. A `break_begin` overwrites any unmatched earlier one; a
/// `break_end` without an open start is ignored. Work time is only computed
/// when both a clock-in and a later clock-out exist.
///
/// Punches are ordered by `(timestamp, id)` before scanning, so the result
/// does not depend on input order. Punches belonging to other employees are
/// skipped.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::aggregate_work_record;
/// use compensation_engine::models::{PunchEvent, PunchKind};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let at = |h| Utc.with_ymd_and_hms(2025, 4, 1, h, 0, 0).unwrap();
/// let punches = vec![
///     PunchEvent::new("emp_001", PunchKind::ClockIn, at(9)),
///     PunchEvent::new("emp_001", PunchKind::BreakBegin, at(12)),
///     PunchEvent::new("emp_001", PunchKind::BreakEnd, at(13)),
///     PunchEvent::new("emp_001", PunchKind::ClockOut, at(18)),
/// ];
///
/// let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
/// let record = aggregate_work_record("emp_001", date, &punches);
/// assert_eq!(record.break_minutes, 60);
/// assert_eq!(record.work_minutes, 480);
/// ```
pub fn aggregate_work_record(
    employee_id: &str,
    date: NaiveDate,
    punches: &[PunchEvent],
) -> WorkRecord {
    let mut ordered: Vec<&PunchEvent> = punches
        .iter()
        .filter(|p| p.employee_id == employee_id)
        .collect();
    ordered.sort_by(|a, b| (a.timestamp, a.id).cmp(&(b.timestamp, b.id)));

    let mut clock_in: Option<DateTime<Utc>> = None;
    let mut clock_out: Option<DateTime<Utc>> = None;
    let mut open_break: Option<DateTime<Utc>> = None;
    let mut break_duration = TimeDelta::zero();

    for punch in ordered {
        match punch.kind {
            PunchKind::ClockIn => {
                if clock_in.is_none() {
                    clock_in = Some(punch.timestamp);
                }
            }
            PunchKind::ClockOut => clock_out = Some(punch.timestamp),
            PunchKind::BreakBegin => {
                if open_break.is_some() {
                    warn!(
                        employee_id,
                        %date,
                        punch_id = %punch.id,
                        "break_begin overrides an unmatched break_begin"
                    );
                }
                open_break = Some(punch.timestamp);
            }
            PunchKind::BreakEnd => match open_break.take() {
                Some(start) => break_duration += punch.timestamp - start,
                None => warn!(
                    employee_id,
                    %date,
                    punch_id = %punch.id,
                    "break_end without an open break ignored"
                ),
            },
        }
    }

    if open_break.is_some() {
        warn!(employee_id, %date, "trailing break_begin contributes no break time");
    }

    let work_duration = match (clock_in, clock_out) {
        (Some(start), Some(end)) if end > start => {
            let worked = (end - start) - break_duration;
            if worked < TimeDelta::zero() {
                warn!(
                    employee_id,
                    %date,
                    break_minutes = break_duration.num_minutes(),
                    "breaks exceed the working span; work time clamped to zero"
                );
                TimeDelta::zero()
            } else {
                worked
            }
        }
        (Some(_), Some(_)) => {
            warn!(employee_id, %date, "clock_out is not after clock_in");
            TimeDelta::zero()
        }
        (Some(_), None) => {
            warn!(employee_id, %date, "missing clock_out");
            TimeDelta::zero()
        }
        (None, Some(_)) => {
            warn!(employee_id, %date, "missing clock_in");
            TimeDelta::zero()
        }
        (None, None) => TimeDelta::zero(),
    };

    WorkRecord {
        employee_id: employee_id.to_string(),
        date,
        clock_in,
        clock_out,
        break_minutes: break_duration.num_minutes(),
        work_minutes: work_duration.num_minutes(),
    }
}
