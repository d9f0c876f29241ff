//! Domain layer containing business entities and store contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Record store trait definitions
//! - [`click_event`] - Click-count increment event
//! - [`click_worker`] - Asynchronous increment worker
//!
//! # Click Counting Flow
//!
//! 1. The resolver determines the destination of a slug
//! 2. A [`click_event::ClickEvent`] is offered to a bounded channel (never awaited)
//! 3. [`click_worker::run_click_worker`] applies a relative increment per event
//! 4. Failures are logged and counted; the redirect has already been served

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
