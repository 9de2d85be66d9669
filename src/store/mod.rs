//! Record storage for the Compensation Calculation Engine.
//!
//! [`Directory`] is the read-only registry of employees and their employers;
//! [`TimeClockLedger`] owns punches and the work records derived from them.

mod directory;
mod ledger;

pub use directory::{Directory, Placement};
pub use ledger::{TimeClockLedger, WorkDayKey};
