//! Compensation Calculation Engine
//!
//! This crate turns raw time-clock punches into daily work records, resolves
//! statutory health insurance and pension premiums from period-versioned
//! rate brackets, aggregates monthly allowances, and composes gross and net
//! payroll.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
