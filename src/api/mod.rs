//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.
//! Successful responses are bare JSON bodies; failures go through
//! [`AppError`](crate::errors::AppError)'s `{"error": ...}` body.

mod profile;
mod scan;

pub use profile::*;
pub use scan::*;

use axum::Json;

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<Json<T>, crate::errors::AppError>;
