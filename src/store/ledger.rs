//! Punch log and work-record table.
//!
//! The ledger stores punches and the work records derived from them. Every
//! change to a day's punches is followed by a full recompute of that day's
//! record. The read-recompute-write sequence is serialized per
//! `(employee, date)` key so concurrent punches for the same day cannot
//! produce divergent records; different keys never contend. Punch ids are
//! indexed by day, so a recompute only reads that day's punches, and a key's
//! lock entry is dropped once no caller holds or waits on it.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{aggregate_work_record, day_bounds, local_date};
use crate::error::{EngineError, EngineResult};
use crate::models::{PunchEvent, PunchKind, WorkRecord};

/// Identifies one employee's calendar day.
pub type WorkDayKey = (String, NaiveDate);

/// In-memory punch log with per-day work records.
#[derive(Debug)]
pub struct TimeClockLedger {
    offset: FixedOffset,
    punches: RwLock<HashMap<Uuid, PunchEvent>>,
    days: RwLock<BTreeMap<WorkDayKey, Vec<Uuid>>>,
    records: RwLock<BTreeMap<WorkDayKey, WorkRecord>>,
    key_locks: Mutex<HashMap<WorkDayKey, Arc<Mutex<()>>>>,
}

impl TimeClockLedger {
    /// Creates an empty ledger whose days are delimited in `offset`.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            punches: RwLock::new(HashMap::new()),
            days: RwLock::new(BTreeMap::new()),
            records: RwLock::new(BTreeMap::new()),
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The offset used for day boundaries.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Records a punch and upserts the work record for its day.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::models::PunchKind;
    /// use compensation_engine::store::TimeClockLedger;
    /// use chrono::{FixedOffset, TimeZone, Utc};
    ///
    /// let ledger = TimeClockLedger::new(FixedOffset::east_opt(0).unwrap());
    /// let at = |h| Utc.with_ymd_and_hms(2025, 4, 1, h, 0, 0).unwrap();
    ///
    /// ledger.record_punch("emp_001", PunchKind::ClockIn, at(9));
    /// let (_, record) = ledger.record_punch("emp_001", PunchKind::ClockOut, at(17));
    /// assert_eq!(record.work_minutes, 480);
    /// ```
    pub fn record_punch(
        &self,
        employee_id: &str,
        kind: PunchKind,
        timestamp: DateTime<Utc>,
    ) -> (PunchEvent, WorkRecord) {
        let punch = PunchEvent::new(employee_id, kind, timestamp);
        let key = self.key_for(&punch);

        let record = self.with_keys_locked(&[&key], || {
            self.punches.write().insert(punch.id, punch.clone());
            self.days.write().entry(key.clone()).or_default().push(punch.id);
            self.recompute_locked(&key)
        });

        info!(
            employee_id,
            punch_id = %punch.id,
            kind = ?kind,
            date = %key.1,
            work_minutes = record.work_minutes,
            "Punch recorded"
        );
        (punch, record)
    }

    /// Applies an approved correction to an existing punch.
    ///
    /// The corrected punch keeps its id and employee. The day it now falls on
    /// is recomputed, and so is the day it used to fall on if that differs.
    /// Returns the record for the corrected punch's day.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PunchNotFound`] if no punch has `punch_id`.
    pub fn amend_punch(
        &self,
        punch_id: Uuid,
        kind: PunchKind,
        timestamp: DateTime<Utc>,
    ) -> EngineResult<WorkRecord> {
        loop {
            let original = self
                .punches
                .read()
                .get(&punch_id)
                .cloned()
                .ok_or(EngineError::PunchNotFound { punch_id })?;

            let corrected = PunchEvent {
                id: punch_id,
                employee_id: original.employee_id.clone(),
                kind,
                timestamp,
            };
            let old_key = self.key_for(&original);
            let new_key = self.key_for(&corrected);

            let mut keys = vec![&old_key, &new_key];
            keys.sort();
            keys.dedup();

            let outcome = self.with_keys_locked(&keys, || {
                // Another correction may have moved the punch while we waited.
                let still_on_old_day = self
                    .punches
                    .read()
                    .get(&punch_id)
                    .is_some_and(|current| self.key_for(current) == old_key);
                if !still_on_old_day {
                    return None;
                }

                self.punches.write().insert(punch_id, corrected.clone());
                if old_key != new_key {
                    let mut days = self.days.write();
                    if let Some(ids) = days.get_mut(&old_key) {
                        ids.retain(|id| *id != punch_id);
                    }
                    days.entry(new_key.clone()).or_default().push(punch_id);
                }

                let record = self.recompute_locked(&new_key);
                if old_key != new_key {
                    self.recompute_locked(&old_key);
                }
                Some(record)
            });

            let Some(record) = outcome else {
                continue;
            };

            info!(
                employee_id = %original.employee_id,
                punch_id = %punch_id,
                from_date = %old_key.1,
                to_date = %new_key.1,
                "Punch amended"
            );
            return Ok(record);
        }
    }

    /// Rebuilds the work record for one employee and day from its punches.
    pub fn recompute(&self, employee_id: &str, date: NaiveDate) -> WorkRecord {
        let key = (employee_id.to_string(), date);
        self.with_keys_locked(&[&key], || self.recompute_locked(&key))
    }

    /// The stored work record for one employee and day.
    pub fn work_record(&self, employee_id: &str, date: NaiveDate) -> Option<WorkRecord> {
        self.records
            .read()
            .get(&(employee_id.to_string(), date))
            .cloned()
    }

    /// All stored work records for an employee, ordered by date.
    pub fn work_records(&self, employee_id: &str) -> Vec<WorkRecord> {
        self.records
            .read()
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect()
    }

    /// The punches falling on one employee's day, ordered by timestamp.
    pub fn punches_for_day(&self, employee_id: &str, date: NaiveDate) -> Vec<PunchEvent> {
        let ids = self
            .days
            .read()
            .get(&(employee_id.to_string(), date))
            .cloned()
            .unwrap_or_default();

        // An unlocked reader can race a correction that is moving a punch.
        let (start, end) = day_bounds(date, self.offset);
        let punches_by_id = self.punches.read();
        let mut punches: Vec<PunchEvent> = ids
            .iter()
            .filter_map(|id| punches_by_id.get(id))
            .filter(|p| (start..end).contains(&p.timestamp))
            .cloned()
            .collect();
        drop(punches_by_id);
        punches.sort_by(|a, b| (a.timestamp, a.id).cmp(&(b.timestamp, b.id)));
        punches
    }

    fn key_for(&self, punch: &PunchEvent) -> WorkDayKey {
        (
            punch.employee_id.clone(),
            local_date(punch.timestamp, self.offset),
        )
    }

    /// Runs `f` while holding the locks for `keys`, which must be sorted and
    /// distinct.
    fn with_keys_locked<R>(&self, keys: &[&WorkDayKey], f: impl FnOnce() -> R) -> R {
        let locks: Vec<Arc<Mutex<()>>> = {
            let mut table = self.key_locks.lock();
            keys.iter()
                .map(|key| table.entry((*key).clone()).or_default().clone())
                .collect()
        };

        let result = {
            let _guards: Vec<_> = locks.iter().map(|lock| lock.lock()).collect();
            f()
        };

        // A count of two means only the table and `locks` still reference it.
        let mut table = self.key_locks.lock();
        for (key, lock) in keys.iter().zip(&locks) {
            if Arc::strong_count(lock) == 2 {
                table.remove(*key);
            }
        }
        result
    }

    /// Caller must hold the key lock for `key`.
    fn recompute_locked(&self, key: &WorkDayKey) -> WorkRecord {
        let (employee_id, date) = key;
        let punches = self.punches_for_day(employee_id, *date);
        let record = aggregate_work_record(employee_id, *date, &punches);

        debug!(
            employee_id = %employee_id,
            date = %date,
            punches = punches.len(),
            break_minutes = record.break_minutes,
            work_minutes = record.work_minutes,
            "Work record recomputed"
        );
        self.records.write().insert(key.clone(), record.clone());
        record
    }
}
