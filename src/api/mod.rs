//! HTTP API module for the Payroll Engine.
//!
//! This module provides the REST API endpoints for managing compensation
//! templates, running stateless calculations and driving pay run sessions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculationRequest, CreatePayRunRequest, CreateTemplateRequest, FilterRequest, RosterRequest,
    SelectTemplateRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, DeleteTemplateResponse, PayRunResponse,
};
pub use state::AppState;
