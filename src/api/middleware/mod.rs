//! HTTP middleware for request processing.
//!
//! Provides caller authentication and request tracing.

pub mod auth;
pub mod tracing;

pub use auth::CurrentUser;
