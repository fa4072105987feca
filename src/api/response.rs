//! Response types for the Payroll Engine API.
//!
//! This module defines the success envelopes, the error response structures
//! and the mapping from [`EngineError`] to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    CompensationTemplate, DepartmentFilter, EmployeePay, PayPeriod, PayRunResult, PayRunTotals,
};
use crate::payrun::{PayRunSession, PayRunState};

/// Response body of the stateless `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub calculated_at: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The unrounded pay run result.
    pub result: PayRunResult,
    /// Totals rounded for presentation.
    pub display_totals: PayRunTotals,
    /// Per-employee breakdowns rounded for presentation.
    pub display_employees: Vec<EmployeePay>,
}

fn display_employees(result: &PayRunResult, presentation_scale: u32) -> Vec<EmployeePay> {
    result
        .employees
        .iter()
        .map(|e| e.rounded(presentation_scale))
        .collect()
}

impl CalculationResponse {
    /// Wraps a result, stamping it with a fresh ID and the current time.
    pub fn new(result: PayRunResult, presentation_scale: u32) -> Self {
        let display_totals = result.totals.rounded(presentation_scale);
        let display_employees = display_employees(&result, presentation_scale);
        Self {
            calculation_id: Uuid::new_v4(),
            calculated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            result,
            display_totals,
            display_employees,
        }
    }
}

/// A pay run session as returned by the `/payruns` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRunResponse {
    /// The session ID.
    pub id: Uuid,
    /// The pay period.
    pub pay_period: PayPeriod,
    /// The department filter.
    pub department: DepartmentFilter,
    /// The selected template.
    pub template_id: String,
    /// The session's working copy of the template.
    pub working_config: CompensationTemplate,
    /// Lifecycle state.
    pub state: PayRunState,
    /// The latest result, if any.
    pub result: Option<PayRunResult>,
    /// Totals of the latest result rounded for presentation.
    pub display_totals: Option<PayRunTotals>,
    /// Per-employee breakdowns of the latest result rounded for presentation.
    pub display_employees: Option<Vec<EmployeePay>>,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
    /// When the session was confirmed.
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl PayRunResponse {
    /// Builds the view of a session.
    pub fn from_session(session: &PayRunSession, presentation_scale: u32) -> Self {
        let result = session.result().cloned();
        let display_totals = result
            .as_ref()
            .map(|r| r.totals.rounded(presentation_scale));
        let display_employees = result
            .as_ref()
            .map(|r| display_employees(r, presentation_scale));
        Self {
            id: session.id(),
            pay_period: session.pay_period(),
            department: session.department().clone(),
            template_id: session.template_id().to_string(),
            working_config: session.working_config().clone(),
            state: session.state(),
            result,
            display_totals,
            display_employees,
            created_at: session.created_at(),
            confirmed_at: session.confirmed_at(),
        }
    }
}

/// Response body of `DELETE /templates/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTemplateResponse {
    /// The removed template.
    pub deleted: CompensationTemplate,
    /// The template now used in place of the removed one.
    pub fallback_template_id: String,
    /// Pay runs whose selection moved to the fallback template.
    pub reselected_payruns: Vec<Uuid>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            ),
            EngineError::ConfigParseError { path, message } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            ),
            EngineError::InvalidTemplate { field, .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details("INVALID_TEMPLATE", message, format!("field: {}", field)),
            ),
            EngineError::InvalidEmployeeData { employee_id, .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    format!("employee: {}", employee_id),
                ),
            ),
            EngineError::InvalidPeriod { .. } => {
                ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::new("INVALID_PERIOD", message))
            }
            EngineError::TemplateNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("TEMPLATE_NOT_FOUND", message),
            ),
            EngineError::SessionNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("PAYRUN_NOT_FOUND", message),
            ),
            EngineError::LastTemplate { .. } => {
                ApiErrorResponse::new(StatusCode::CONFLICT, ApiError::new("LAST_TEMPLATE", message))
            }
            EngineError::StaleConfirmation { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "STALE_CONFIRMATION",
                    message,
                    "The configuration changed after the last calculation",
                ),
            ),
            EngineError::InvalidTransition { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::new("INVALID_TRANSITION", message),
            ),
        }
    }
}
