//! HTTP API module for the compensation engine.
//!
//! This module exposes punch intake, work records and the monthly premium
//! and payroll calculations as REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AmendPunchRequest, PeriodQuery, PunchRequest};
pub use response::{ApiError, ApiErrorResponse, PunchResponse};
pub use state::AppState;
