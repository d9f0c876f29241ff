//! Utility functions shared across layers.
//!
//! - [`url_normalizer`] - Destination URL and slug candidate normalization
//! - [`slug_generator`] - Random slug generation
//! - [`db_error`] - `sqlx` error classification

pub mod db_error;
pub mod slug_generator;
pub mod url_normalizer;
