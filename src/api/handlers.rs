//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_pay_run;
use crate::error::{EngineError, EngineResult};
use crate::models::TemplatePatch;
use crate::payrun::PayRunSession;
use crate::store::NEW_TEMPLATE_NAME;

use super::request::{
    CalculationRequest, CreatePayRunRequest, CreateTemplateRequest, FilterRequest, RosterRequest,
    SelectTemplateRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, DeleteTemplateResponse, PayRunResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/templates", get(list_templates).post(create_template))
        .route(
            "/templates/:id",
            get(get_template).patch(update_template).delete(delete_template),
        )
        .route("/templates/:id/duplicate", post(duplicate_template))
        .route("/calculate", post(calculate_handler))
        .route("/payruns", post(create_payrun))
        .route("/payruns/:id", get(get_payrun).delete(delete_payrun))
        .route("/payruns/:id/template", post(select_payrun_template))
        .route("/payruns/:id/config", patch(edit_payrun_config))
        .route("/payruns/:id/filter", put(set_payrun_filter))
        .route("/payruns/:id/calculate", post(calculate_payrun))
        .route("/payruns/:id/confirm", post(confirm_payrun))
        .route("/payruns/:id/save", post(save_payrun))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn respond<T: Serialize>(correlation_id: Uuid, status: StatusCode, result: EngineResult<T>) -> Response {
    match result {
        Ok(body) => json_response(status, body),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Unwraps a JSON body or builds the 400 response describing why it was
/// rejected.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the bad field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Session IDs that are not UUIDs cannot name a session.
fn parse_session_id(raw: &str) -> EngineResult<Uuid> {
    raw.parse()
        .map_err(|_| EngineError::SessionNotFound { id: raw.to_string() })
}

/// Handler for GET /templates.
async fn list_templates(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.templates().list())
}

/// Handler for POST /templates.
///
/// Creates a template from the given parameters, or from the default
/// template's values, under the given name or the default new-template
/// name.
async fn create_template(
    State(state): State<AppState>,
    payload: Result<Json<CreateTemplateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let name = request.name.as_deref().unwrap_or(NEW_TEMPLATE_NAME);
    let result = state
        .templates()
        .create_named(name, request.parameters.as_ref());

    if let Ok(template) = &result {
        info!(correlation_id = %correlation_id, template_id = %template.id, "Template created");
    }
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for GET /templates/:id.
async fn get_template(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    respond(correlation_id, StatusCode::OK, state.templates().get(&id))
}

/// Handler for PATCH /templates/:id.
async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TemplatePatch>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let patch = match parse_body(correlation_id, payload) {
        Ok(patch) => patch,
        Err(response) => return response,
    };

    info!(correlation_id = %correlation_id, template_id = %id, "Updating template");
    respond(correlation_id, StatusCode::OK, state.templates().update(&id, &patch))
}

/// Handler for DELETE /templates/:id.
///
/// Open pay runs that had the deleted template selected move to the
/// fallback template.
async fn delete_template(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();

    let (deleted, fallback_template_id) = match state.templates().delete(&id) {
        Ok(deleted) => deleted,
        Err(err) => return error_response(correlation_id, err),
    };

    let reselected = state.templates().read(|store| {
        state.for_each_session(|session| {
            session
                .handle_template_deleted(store, &id)
                .map(|moved| moved.then(|| session.id()))
        })
    });

    let mut reselected_payruns = Vec::new();
    for outcome in reselected {
        match outcome {
            Ok(Some(session_id)) => reselected_payruns.push(session_id),
            Ok(None) => {}
            Err(err) => return error_response(correlation_id, err),
        }
    }

    info!(
        correlation_id = %correlation_id,
        template_id = %id,
        fallback_template_id = %fallback_template_id,
        reselected = reselected_payruns.len(),
        "Template deleted"
    );
    json_response(
        StatusCode::OK,
        DeleteTemplateResponse {
            deleted,
            fallback_template_id,
            reselected_payruns,
        },
    )
}

/// Handler for POST /templates/:id/duplicate.
async fn duplicate_template(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = state.templates().duplicate(&id);
    if let Ok(copy) = &result {
        info!(correlation_id = %correlation_id, source = %id, template_id = %copy.id, "Template duplicated");
    }
    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /calculate endpoint.
///
/// Runs one stateless pay run calculation and wraps the result with an ID
/// and timestamp.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let template = match state
        .templates()
        .read(|store| request.resolve_template(store))
    {
        Ok(template) => template,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    match calculate_pay_run(
        &request.roster,
        &template,
        &request.department,
        request.pay_period,
    ) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                template_id = %template.id,
                employee_count = result.totals.employee_count,
                sum_net = %result.totals.sum_net,
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            json_response(
                StatusCode::OK,
                CalculationResponse::new(result, state.presentation_scale()),
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payruns.
async fn create_payrun(
    State(state): State<AppState>,
    payload: Result<Json<CreatePayRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let session = state.templates().read(|store| {
        let template_id = request
            .template_id
            .as_deref()
            .unwrap_or_else(|| store.fallback_template_id());
        PayRunSession::new(store, template_id, request.pay_period, request.department)
    });

    match session {
        Ok(session) => {
            let view = PayRunResponse::from_session(&session, state.presentation_scale());
            info!(correlation_id = %correlation_id, session_id = %session.id(), "Pay run opened");
            state.insert_session(session);
            json_response(StatusCode::CREATED, view)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /payruns/:id.
async fn get_payrun(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    let scale = state.presentation_scale();
    let result = parse_session_id(&id).and_then(|id| {
        state.with_session(id, |session| Ok(PayRunResponse::from_session(session, scale)))
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for DELETE /payruns/:id.
///
/// Closes the session and returns its final state.
async fn delete_payrun(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    let scale = state.presentation_scale();
    let result = parse_session_id(&id).and_then(|id| state.remove_session(id));

    if let Ok(session) = &result {
        info!(correlation_id = %correlation_id, session_id = %session.id(), "Pay run closed");
    }
    let response = result.map(|session| PayRunResponse::from_session(&session, scale));
    respond(correlation_id, StatusCode::OK, response)
}

/// Handler for POST /payruns/:id/template.
async fn select_payrun_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SelectTemplateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let scale = state.presentation_scale();
    let result = parse_session_id(&id).and_then(|id| {
        state.templates().read(|store| {
            state.with_session(id, |session| {
                session.select_template(store, &request.template_id)?;
                Ok(PayRunResponse::from_session(session, scale))
            })
        })
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for PATCH /payruns/:id/config.
///
/// Edits only the session's working configuration; the stored template is
/// untouched until the pay run is saved.
async fn edit_payrun_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TemplatePatch>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let patch = match parse_body(correlation_id, payload) {
        Ok(patch) => patch,
        Err(response) => return response,
    };

    let scale = state.presentation_scale();
    let result = parse_session_id(&id).and_then(|id| {
        state.with_session(id, |session| {
            session.edit(&patch)?;
            Ok(PayRunResponse::from_session(session, scale))
        })
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for PUT /payruns/:id/filter.
async fn set_payrun_filter(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let scale = state.presentation_scale();
    let result = parse_session_id(&id).and_then(|id| {
        state.with_session(id, |session| {
            if let Some(pay_period) = request.pay_period {
                session.set_period(pay_period)?;
            }
            if let Some(department) = request.department {
                session.set_department(department)?;
            }
            Ok(PayRunResponse::from_session(session, scale))
        })
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /payruns/:id/calculate.
async fn calculate_payrun(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RosterRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let scale = state.presentation_scale();
    let start_time = Instant::now();
    let result = parse_session_id(&id).and_then(|id| {
        state.with_session(id, |session| {
            session.calculate(&request.roster)?;
            Ok(PayRunResponse::from_session(session, scale))
        })
    });

    if let Ok(view) = &result {
        info!(
            correlation_id = %correlation_id,
            session_id = %view.id,
            roster_size = request.roster.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Pay run calculated"
        );
    }
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /payruns/:id/confirm.
async fn confirm_payrun(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    let scale = state.presentation_scale();
    let result = parse_session_id(&id).and_then(|id| {
        state.with_session(id, |session| {
            session.confirm()?;
            Ok(PayRunResponse::from_session(session, scale))
        })
    });
    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /payruns/:id/save.
///
/// Writes the working configuration back to the selected stored template.
async fn save_payrun(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = parse_session_id(&id).and_then(|id| {
        state
            .templates()
            .write(|store| state.with_session(id, |session| session.save(store)))
    });
    respond(correlation_id, StatusCode::OK, result)
}
