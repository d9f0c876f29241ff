//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Input rules
//! are enforced by the services, not here.

pub mod health;
pub mod links;
pub mod statistics;
