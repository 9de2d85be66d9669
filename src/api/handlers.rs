//! HTTP request handlers for the compensation engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_health_insurance, calculate_pension, compose_payroll};
use crate::error::{EngineError, EngineResult};

use super::request::{AmendPunchRequest, PeriodQuery, PunchRequest};
use super::response::{ApiError, ApiErrorResponse, PunchResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/punches", post(record_punch_handler))
        .route("/punches/:id", put(amend_punch_handler))
        .route("/employees/:id/work-records", get(work_records_handler))
        .route(
            "/employees/:id/health-insurance",
            get(health_insurance_handler),
        )
        .route("/employees/:id/pension", get(pension_handler))
        .route("/employees/:id/payroll", get(payroll_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Converts a JSON body rejection into a 400 response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the bad field.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn validation_rejection(correlation_id: Uuid, message: String) -> Response {
    warn!(correlation_id = %correlation_id, error = %message, "Invalid request parameters");
    ApiErrorResponse::bad_request(ApiError::validation_error(message)).into_response()
}

fn engine_failure(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Handler for `POST /punches`.
///
/// Stores the punch and returns it together with the recomputed work record
/// for its day.
async fn record_punch_handler(
    State(state): State<AppState>,
    payload: Result<Json<PunchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing punch");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    if let Err(err) = state.config().directory().employee(&request.employee_id) {
        return engine_failure(correlation_id, err);
    }

    let (punch, work_record) =
        state
            .ledger()
            .record_punch(&request.employee_id, request.kind, request.timestamp);

    info!(
        correlation_id = %correlation_id,
        employee_id = %punch.employee_id,
        punch_id = %punch.id,
        "Punch stored"
    );
    json_response(StatusCode::CREATED, PunchResponse { punch, work_record })
}

/// Handler for `PUT /punches/:id`.
///
/// Applies an approved correction and returns the recomputed work record.
async fn amend_punch_handler(
    State(state): State<AppState>,
    punch_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AmendPunchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing punch correction");

    let punch_id = match punch_id {
        Ok(Path(id)) => id,
        Err(rejection) => return validation_rejection(correlation_id, rejection.body_text()),
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    match state
        .ledger()
        .amend_punch(punch_id, request.kind, request.timestamp)
    {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for `GET /employees/:id/work-records`.
async fn work_records_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    if let Err(err) = state.config().directory().employee(&employee_id) {
        return engine_failure(correlation_id, err);
    }

    let records = state.ledger().work_records(&employee_id);
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        records = records.len(),
        "Work records listed"
    );
    json_response(StatusCode::OK, records)
}

/// Runs a monthly calculation for one employee and renders the outcome.
fn run_calculation<T, F>(
    label: &'static str,
    employee_id: &str,
    query: Result<Query<PeriodQuery>, QueryRejection>,
    calculate: F,
) -> Response
where
    T: Serialize,
    F: FnOnce(i32, u32) -> EngineResult<T>,
{
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id,
        calculation = label,
        "Processing calculation request"
    );

    let period = match query {
        Ok(Query(period)) => period,
        Err(rejection) => return validation_rejection(correlation_id, rejection.body_text()),
    };

    let start_time = Instant::now();
    match calculate(period.year, period.month) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id,
                calculation = label,
                year = period.year,
                month = period.month,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for `GET /employees/:id/health-insurance?year=&month=`.
async fn health_insurance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Response {
    let config = state.config();
    run_calculation("health_insurance", &employee_id, query, |year, month| {
        calculate_health_insurance(
            config.directory(),
            config.rate_table(),
            &employee_id,
            year,
            month,
        )
    })
}

/// Handler for `GET /employees/:id/pension?year=&month=`.
async fn pension_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Response {
    let config = state.config();
    run_calculation("pension", &employee_id, query, |year, month| {
        calculate_pension(
            config.directory(),
            config.rate_table(),
            &employee_id,
            year,
            month,
        )
    })
}

/// Handler for `GET /employees/:id/payroll?year=&month=`.
async fn payroll_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Response {
    let config = state.config();
    run_calculation("payroll", &employee_id, query, |year, month| {
        compose_payroll(
            config.directory(),
            config.rate_table(),
            &employee_id,
            year,
            month,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{HealthInsuranceResult, WorkRecord};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    fn punch_body(kind: &str, timestamp: &str) -> String {
        format!(
            r#"{{"employee_id": "emp_young", "type": "{}", "timestamp": "{}"}}"#,
            kind, timestamp
        )
    }

    async fn post_punch(router: Router, body: String) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/punches")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_001_punch_returns_201_with_record() {
        let router = create_router(create_test_state());

        // 09:00 JST on 2025-04-01.
        let response = post_punch(router, punch_body("clock_in", "2025-04-01T00:00:00Z")).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: PunchResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.punch.employee_id, "emp_young");
        assert_eq!(result.work_record.date.to_string(), "2025-04-01");
        assert_eq!(result.work_record.work_minutes, 0);
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = post_punch(router, "{invalid json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_unknown_employee_punch_returns_404() {
        let router = create_router(create_test_state());

        let body = r#"{"employee_id": "emp_404", "type": "clock_in", "timestamp": "2025-04-01T00:00:00Z"}"#;
        let response = post_punch(router, body.to_string()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_api_004_full_day_via_router() {
        let state = create_test_state();

        for (kind, at) in [
            ("clock_in", "2025-04-01T00:00:00Z"),
            ("break_begin", "2025-04-01T03:00:00Z"),
            ("break_end", "2025-04-01T04:00:00Z"),
            ("clock_out", "2025-04-01T09:00:00Z"),
        ] {
            let response = post_punch(create_router(state.clone()), punch_body(kind, at)).await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/employees/emp_young/work-records")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let records: Vec<WorkRecord> = serde_json::from_slice(&body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].break_minutes, 60);
        assert_eq!(records[0].work_minutes, 480);
    }

    #[tokio::test]
    async fn test_api_005_health_insurance_returns_200() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/employees/emp_young/health-insurance?year=2025&month=4")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: HealthInsuranceResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.grade, "22");
        assert!(!result.with_care);
    }

    #[tokio::test]
    async fn test_api_006_missing_query_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/employees/emp_young/pension?year=2025")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }
}
