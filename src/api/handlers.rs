//! HTTP request handlers for the Commission Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    allocate_installments, calculate_compensation, discount_warnings, round_currency,
    summarize_discounts,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, AuditWarning, CompensationResult};

use super::request::{AllocationRequest, CompensationRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/compensation", post(compensation_handler))
        .route("/discounts/allocate", post(allocation_handler))
        .with_state(state)
}

/// Handler for POST /compensation endpoint.
///
/// Computes the employee's compensation and deducts the discount
/// installments due in the reporting period.
async fn compensation_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompensationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compensation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_to_error(rejection, correlation_id),
            );
        }
    };

    if let Err(err) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Compensation request failed validation"
        );
        return engine_error_response(err.into());
    }

    let config = state.config();
    if let Err(err) = config.get_role(request.employee.role) {
        warn!(
            correlation_id = %correlation_id,
            role = %request.employee.role,
            "Role not found"
        );
        return engine_error_response(err.into());
    }

    let start_time = Instant::now();
    match perform_calculation(&request, config) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                role = %result.role,
                discounts_count = request.discounts.len(),
                total = %result.compensation.total,
                net_pay = %result.net_pay,
                duration_us = duration.as_micros(),
                "Compensation calculated successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Compensation calculation failed"
            );
            engine_error_response(err.into())
        }
    }
}

/// Handler for POST /discounts/allocate endpoint.
///
/// Splits one discount into installments and returns those selected for
/// the requested period.
async fn allocation_handler(
    payload: Result<Json<AllocationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allocation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_to_error(rejection, correlation_id),
            );
        }
    };

    if let Err(err) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Allocation request failed validation"
        );
        return engine_error_response(err.into());
    }

    let installments = allocate_installments(
        &request.discount,
        request.period.as_ref(),
        request.no_filter_mode(),
    );

    info!(
        correlation_id = %correlation_id,
        discount_id = ?request.discount.id,
        selected = installments.len(),
        "Discount allocated successfully"
    );
    json_response(StatusCode::OK, installments)
}

/// Runs the compensation calculation and the discount deduction.
fn perform_calculation(
    request: &CompensationRequest,
    config: &ConfigLoader,
) -> EngineResult<CompensationResult> {
    let start_time = Instant::now();
    let employee = &request.employee;
    let role = config.get_role(employee.role)?;
    let period = request.reporting_period();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    if role.path != employee.path {
        warnings.push(AuditWarning {
            code: "PATH_ROLE_MISMATCH".to_string(),
            message: format!(
                "Employee path {:?} differs from the {:?} path of role '{}'; bonuses follow the employee path",
                employee.path, role.path, role.id
            ),
            severity: "warning".to_string(),
        });
    }

    let calculation = calculate_compensation(
        employee,
        role,
        config.bonuses(),
        request.average_team_performance,
        1,
    );
    let mut steps: Vec<AuditStep> = calculation.audit_steps;

    let discounts = summarize_discounts(&request.discounts, period.as_ref());
    warnings.extend(discount_warnings(&request.discounts));
    if period.is_none() && !request.discounts.is_empty() {
        warnings.push(AuditWarning {
            code: "NO_REPORTING_PERIOD".to_string(),
            message: "No period or current date given; no discounts deducted".to_string(),
            severity: "info".to_string(),
        });
    }

    let net_pay = round_currency(
        calculation
            .compensation
            .total
            .saturating_sub(discounts.total),
    );

    let step_number = steps.len() as u32 + 1;
    steps.push(AuditStep {
        step_number,
        rule_id: "discounts".to_string(),
        rule_name: "Discount Installments".to_string(),
        input: serde_json::json!({
            "discounts_count": request.discounts.len(),
            "period": period
        }),
        output: serde_json::json!({
            "deducted": discounts.total.to_string(),
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "{} discount(s) with installments in period, ${} deducted from ${}",
            discounts.discounts.len(),
            discounts.total,
            calculation.compensation.total
        ),
    });

    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(CompensationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        plan_code: config.plan().code.clone(),
        plan_version: config.plan().version.clone(),
        currency: config.plan().currency.clone(),
        employee_id: employee.id.clone(),
        role: employee.role,
        period,
        compensation: calculation.compensation,
        performance_status: calculation.performance_status,
        discounts,
        net_pay,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

/// Maps a JSON body rejection to the API error reported to the caller.
fn rejection_to_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("role: unknown variant") {
                ApiError::with_details("ROLE_NOT_FOUND", "Role not found", body_text)
            } else if body_text.contains("missing field") {
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
    }
}

fn engine_error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
