//! HTTP API module for the Commission Engine.
//!
//! This module provides the REST endpoints for computing an employee's
//! compensation net of discounts and for allocating a discount into
//! monthly installments.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AllocationRequest, CompensationRequest};
pub use response::ApiError;
pub use state::AppState;
