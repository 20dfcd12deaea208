//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_isr, calculate_salary_breakdown, calculate_severance, calculate_vat,
    check_digit_for, describe_nss, estimate_settlement, format_nss, generate_nss,
    validate_nss_as_of,
};
use crate::config::RateConfig;
use crate::error::EngineResult;
use crate::models::{GeneratedNss, NssGenerationRequest};

use super::request::{
    CheckDigitRequest, IsrRequest, NssValidateRequest, SalaryRequest, SettlementEstimateRequest,
    SeveranceRequest, VatRequest,
};
use super::response::{ApiError, ApiErrorResponse, CheckDigitResponse, NssValidationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/isr", post(isr_handler))
        .route("/vat", post(vat_handler))
        .route("/salary", post(salary_handler))
        .route("/severance", post(severance_handler))
        .route("/severance/estimate", post(settlement_estimate_handler))
        .route("/nss/validate", post(nss_validate_handler))
        .route("/nss/generate", post(nss_generate_handler))
        .route("/nss/check-digit", post(check_digit_handler))
        .route("/regions", get(regions_handler))
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

fn error_response(correlation_id: Uuid, api_error: ApiErrorResponse) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = %api_error.error.code,
        error = %api_error.error.message,
        "Request failed"
    );
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body, mapping rejections to API errors.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(error_response(
                correlation_id,
                ApiErrorResponse::bad_request(error),
            ))
        }
    }
}

fn rates_on(state: &AppState, date: NaiveDate) -> EngineResult<&RateConfig> {
    state.config().rates_for(date)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Runs a calculation and logs its outcome and duration.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    operation: &'static str,
    result: EngineResult<T>,
    started: Instant,
) -> Response {
    match result {
        Ok(body) => {
            info!(
                correlation_id = %correlation_id,
                operation,
                duration_us = started.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, body)
        }
        Err(err) => error_response(correlation_id, err.into()),
    }
}

/// Handler for POST /isr.
async fn isr_handler(
    State(state): State<AppState>,
    payload: Result<Json<IsrRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing ISR request");
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let result = rates_on(&state, request.as_of.unwrap_or_else(today))
        .map(|rates| calculate_isr(&request.input, &rates.isr));
    respond(correlation_id, "isr", result, started)
}

/// Handler for POST /vat.
async fn vat_handler(
    State(state): State<AppState>,
    payload: Result<Json<VatRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing VAT request");
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let result = rates_on(&state, request.as_of.unwrap_or_else(today))
        .and_then(|rates| calculate_vat(&request.input, &rates.vat_rates));
    respond(correlation_id, "vat", result, started)
}

/// Handler for POST /salary.
async fn salary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SalaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary breakdown request");
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let result = rates_on(&state, request.as_of.unwrap_or_else(today))
        .map(|rates| calculate_salary_breakdown(&request.input, &rates.contributions));
    respond(correlation_id, "salary", result, started)
}

/// Handler for POST /severance.
async fn severance_handler(
    State(state): State<AppState>,
    payload: Result<Json<SeveranceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing severance request");
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let result = rates_on(&state, request.as_of.unwrap_or_else(today))
        .map(|rates| calculate_severance(&request.input, &rates.severance));
    respond(correlation_id, "severance", result, started)
}

/// Handler for POST /severance/estimate.
async fn settlement_estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettlementEstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settlement estimate request");
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let result = rates_on(&state, request.as_of.unwrap_or_else(today))
        .map(|rates| estimate_settlement(&request.input, &rates.severance));
    respond(correlation_id, "settlement_estimate", result, started)
}

/// Handler for POST /nss/validate.
///
/// Always answers 200; problems with the number are listed in `errors`.
async fn nss_validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<NssValidateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing NSS validation request");
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let regions = state.config().regions();
    let validation =
        validate_nss_as_of(&request.nss, regions, request.as_of.unwrap_or_else(today));
    info!(
        correlation_id = %correlation_id,
        is_valid = validation.is_valid,
        errors = validation.errors.len(),
        "NSS validated"
    );

    let response = NssValidationResponse {
        validation,
        breakdown: describe_nss(&request.nss, regions).ok(),
        formatted: format_nss(&request.nss).ok(),
    };
    json_response(StatusCode::OK, response)
}

fn draw_nss(state: &AppState, request: &NssGenerationRequest) -> EngineResult<GeneratedNss> {
    let mut source = state.sequence();
    generate_nss(request, state.config().regions(), &mut **source)
}

/// Handler for POST /nss/generate.
async fn nss_generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<NssGenerationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing NSS generation request");
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let result = draw_nss(&state, &request);
    respond(correlation_id, "nss_generate", result, started)
}

/// Handler for POST /nss/check-digit.
async fn check_digit_handler(payload: Result<Json<CheckDigitRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let result = check_digit_for(&request.base).map(|check_digit| CheckDigitResponse {
        nss: format!("{}{}", request.base, check_digit),
        base: request.base.clone(),
        check_digit,
    });
    respond(correlation_id, "check_digit", result, started)
}

/// Handler for GET /regions.
async fn regions_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config().regions())
}
