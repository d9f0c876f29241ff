//! Random slug generation.

use rand::{Rng, distr::Alphanumeric};

/// Default length of generated slugs.
pub const DEFAULT_SLUG_LENGTH: usize = 6;

/// Generates a random slug of `length` characters from `[A-Za-z0-9]`.
///
/// Uniqueness is not guaranteed; callers check the store and retry.
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug(6);
/// assert_eq!(slug.len(), 6);
/// assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_slug(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
