//! Core domain entities.
//!
//! - [`Link`] - A slug mapped to its destination, with a click counter
//! - [`Principal`] - The authenticated caller that owns links
//! - [`MonthlyClicks`], [`SlugMonthlyClicks`] - Read-side aggregates
//!
//! Creation input uses a separate struct ([`NewLink`]) so that store-owned
//! fields (`click_count`, `created_at`) are never supplied by callers.

pub mod link;
pub mod principal;
pub mod stats;

pub use link::{Link, NewLink};
pub use principal::Principal;
pub use stats::{MonthlyClicks, SlugMonthlyClicks};
