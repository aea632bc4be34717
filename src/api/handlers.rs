//! HTTP request handlers for the shift tracker API.
//!
//! This module contains the handler functions for all API endpoints. The
//! caller is identified by the `x-worker-id` header.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::admin::{
    NewOrganization, NewWorker, assign_worker_to_organization, create_location,
    create_organization, register_worker, update_worker_role,
};
use crate::clock::{ClockInCommand, ClockOutCommand, Identity, clock_in, clock_out, resolve_identity};
use crate::reporting::{
    active_locations, clocked_in_staff, current_shift, dashboard_stats, shift_history,
};
use crate::store::Page;

use super::request::{
    AssignOrganizationRequest, ClockInRequest, ClockOutRequest, CreateLocationRequest,
    CreateOrganizationRequest, HistoryQuery, RegisterWorkerRequest, UpdateRoleRequest,
};
use super::response::{ApiError, ApiErrorResponse, ClockResponse};
use super::state::AppState;

/// Header carrying the caller's worker id.
pub const WORKER_ID_HEADER: &str = "x-worker-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts", get(shift_history_handler))
        .route("/shifts/current", get(current_shift_handler))
        .route("/shifts/clock-in", post(clock_in_handler))
        .route("/shifts/clock-out", post(clock_out_handler))
        .route("/organizations", post(create_organization_handler))
        .route(
            "/organizations/:organization_id/clocked-in",
            get(clocked_in_handler),
        )
        .route(
            "/organizations/:organization_id/dashboard",
            get(dashboard_handler),
        )
        .route(
            "/organizations/:organization_id/locations",
            get(list_locations_handler).post(create_location_handler),
        )
        .route("/workers", post(register_worker_handler))
        .route("/workers/:worker_id/role", put(update_role_handler))
        .route(
            "/workers/:worker_id/organization",
            put(assign_organization_handler),
        )
        .with_state(state)
}

/// Handler for POST /shifts/clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ClockInRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock-in request");

    let result = caller(&state, &headers).and_then(|identity| {
        let command = ClockInCommand::try_from(parse_body(payload, correlation_id)?)?;
        let result = clock_in(
            state.store(),
            Some(&identity),
            command,
            state.policy(),
            Utc::now(),
        )?;

        info!(
            correlation_id = %correlation_id,
            worker_id = %identity.worker.id,
            shift_id = %result.shift.id,
            distance_meters = result.geofence.map(|g| g.distance_meters),
            "Clock-in completed"
        );
        Ok(ClockResponse::from(result))
    });

    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /shifts/clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ClockOutRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock-out request");

    let result = caller(&state, &headers).and_then(|identity| {
        let command = ClockOutCommand::try_from(parse_body(payload, correlation_id)?)?;
        let result = clock_out(
            state.store(),
            Some(&identity),
            command,
            state.policy(),
            Utc::now(),
        )?;

        info!(
            correlation_id = %correlation_id,
            worker_id = %identity.worker.id,
            shift_id = %result.shift.id,
            duration_minutes = result.shift.duration_minutes,
            "Clock-out completed"
        );
        Ok(ClockResponse::from(result))
    });

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /shifts/current. Responds `null` when off shift.
async fn current_shift_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();

    let result = caller(&state, &headers)
        .and_then(|identity| Ok(current_shift(state.store(), &identity)?));

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /shifts.
async fn shift_history_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let result = caller(&state, &headers).and_then(|identity| {
        let Query(query) = query.map_err(|rejection| {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid query string"
            );
            ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
        })?;
        let defaults = Page::default();
        let page = Page {
            limit: query.limit.unwrap_or(defaults.limit),
            offset: query.offset.unwrap_or(defaults.offset),
        };
        Ok(shift_history(state.store(), &identity, page)?)
    });

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /organizations/:organization_id/clocked-in.
async fn clocked_in_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(organization_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let result = caller(&state, &headers)
        .and_then(|identity| Ok(clocked_in_staff(state.store(), &identity, &organization_id)?));

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /organizations/:organization_id/dashboard.
async fn dashboard_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(organization_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        organization_id = %organization_id,
        "Building dashboard"
    );

    let result = caller(&state, &headers).and_then(|identity| {
        Ok(dashboard_stats(
            state.store(),
            &identity,
            &organization_id,
            Utc::now(),
        )?)
    });

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for GET /organizations/:organization_id/locations.
async fn list_locations_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(organization_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let result = caller(&state, &headers)
        .and_then(|_| Ok(active_locations(state.store(), &organization_id)?));

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for POST /organizations.
async fn create_organization_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateOrganizationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create organization request");

    let result = caller(&state, &headers).and_then(|identity| {
        let input = NewOrganization::try_from(parse_body(payload, correlation_id)?)
            .map_err(ApiErrorResponse::bad_request)?;
        Ok(create_organization(
            state.store(),
            &identity,
            input,
            state.radius_defaults(),
        )?)
    });

    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /organizations/:organization_id/locations.
async fn create_location_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(organization_id): Path<String>,
    payload: Result<Json<CreateLocationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        organization_id = %organization_id,
        "Processing create location request"
    );

    let result = caller(&state, &headers).and_then(|identity| {
        let input = parse_body(payload, correlation_id)?
            .into_new_location(organization_id)
            .map_err(ApiErrorResponse::bad_request)?;
        Ok(create_location(
            state.store(),
            &identity,
            input,
            state.radius_defaults(),
        )?)
    });

    respond(correlation_id, StatusCode::CREATED, result)
}

/// Handler for POST /workers.
///
/// Registration happens before the worker exists, so no caller header is
/// required.
async fn register_worker_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterWorkerRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing register worker request");

    let result = parse_body(payload, correlation_id).and_then(|body| {
        let input = NewWorker::try_from(body).map_err(ApiErrorResponse::bad_request)?;
        Ok(register_worker(state.store(), input)?)
    });

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for PUT /workers/:worker_id/role.
async fn update_role_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(worker_id): Path<String>,
    payload: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let result = caller(&state, &headers).and_then(|identity| {
        let body = parse_body(payload, correlation_id)?;
        Ok(update_worker_role(
            state.store(),
            &identity,
            &worker_id,
            body.role,
        )?)
    });

    respond(correlation_id, StatusCode::OK, result)
}

/// Handler for PUT /workers/:worker_id/organization.
async fn assign_organization_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(worker_id): Path<String>,
    payload: Result<Json<AssignOrganizationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let result = caller(&state, &headers).and_then(|identity| {
        let body = parse_body(payload, correlation_id)?;
        Ok(assign_worker_to_organization(
            state.store(),
            &identity,
            &worker_id,
            &body.organization_id,
        )?)
    });

    respond(correlation_id, StatusCode::OK, result)
}

/// Resolves the caller named by the worker id header.
fn caller(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiErrorResponse> {
    let worker_id = headers
        .get(WORKER_ID_HEADER)
        .and_then(|value| value.to_str().ok());
    Ok(resolve_identity(state.store(), worker_id)?)
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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
    Err(ApiErrorResponse::bad_request(error))
}

/// Renders a handler outcome as a JSON response.
fn respond<T: Serialize>(
    correlation_id: Uuid,
    status: StatusCode,
    result: Result<T, ApiErrorResponse>,
) -> Response {
    match result {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                status = err.status.as_u16(),
                code = %err.error.code,
                message = %err.error.message,
                "Request rejected"
            );
            err.into_response()
        }
    }
}
