//! HTTP API module for the shift tracker.
//!
//! This module provides the REST endpoints for clocking in and out,
//! viewing shifts and dashboards, and administering organizations,
//! locations, and workers.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{WORKER_ID_HEADER, create_router};
pub use request::{
    AssignOrganizationRequest, ClockInRequest, ClockOutRequest, CreateLocationRequest,
    CreateOrganizationRequest, HistoryQuery, RegisterWorkerRequest, UpdateRoleRequest,
};
pub use response::{ApiError, ApiErrorResponse, ClockResponse};
pub use state::AppState;
