//! Destination URL and slug candidate normalization.
//!
//! Turns raw caller input into a canonical destination (always carrying an
//! `http://` or `https://` scheme) and an optional, syntactically valid slug
//! candidate. Uniqueness is not checked here.
//!
//! # Scheme repair
//!
//! Input without an `http://`/`https://` prefix gets `http://` prepended
//! before validation. The repair is naive: `ftp.example.com`
//! becomes `http://ftp.example.com`.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::error::AppError;

/// Host shape accepted for destinations: dotted labels ending in a 2+ letter TLD.
static DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}$").unwrap());

/// Caller-chosen slugs: ASCII alphanumerics, 3 to 20 characters.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{3,20}$").unwrap());

const DEFAULT_SCHEME: &str = "http://";

/// Result of [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Canonical destination URL.
    pub destination: String,
    /// Validated slug candidate, `None` when the caller supplied none.
    pub slug: Option<String>,
}

/// Normalizes a creation request's inputs.
///
/// A slug candidate that is empty after trimming counts as absent.
///
/// # Errors
///
/// - [`AppError::EmptyInput`] if the URL is blank
/// - [`AppError::InvalidUrl`] if the repaired URL is not an absolute
///   `http`/`https` URL with a domain-shaped host
/// - [`AppError::InvalidSlugFormat`] if the slug candidate is malformed
///
/// # Examples
///
/// ```ignore
/// let n = normalize("  example.com ", Some(" promo2024 ")).unwrap();
/// assert_eq!(n.destination, "http://example.com");
/// assert_eq!(n.slug.as_deref(), Some("promo2024"));
/// ```
pub fn normalize(raw_url: &str, raw_slug: Option<&str>) -> Result<Normalized, AppError> {
    let destination = normalize_url(raw_url)?;

    let slug = match raw_slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(candidate) => {
            validate_slug(candidate)?;
            Some(candidate.to_string())
        }
        None => None,
    };

    Ok(Normalized { destination, slug })
}

/// Normalizes a destination URL.
///
/// The canonical form is the trimmed, scheme-repaired input itself; the
/// URL parser is only used for validation, so `example.com` normalizes to
/// `http://example.com` without a trailing slash.
pub fn normalize_url(raw_url: &str) -> Result<String, AppError> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyInput);
    }

    // Scheme-relative input (`//example.com`) keeps its host.
    let repaired = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{}", trimmed.trim_start_matches('/'))
    };

    validate_url(&repaired)?;
    Ok(repaired)
}

/// Validates a slug candidate's syntax.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        Err(AppError::InvalidSlugFormat {
            slug: slug.to_string(),
        })
    }
}

/// Prepends `http://` to a stored destination lacking a scheme delimiter.
///
/// Applied on resolution for records persisted before validation was strict.
pub fn with_default_scheme(destination: &str) -> String {
    if destination.contains("://") {
        destination.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{destination}")
    }
}

fn has_http_scheme(url: &str) -> bool {
    starts_with_ignore_case(url, "http://") || starts_with_ignore_case(url, "https://")
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn validate_url(candidate: &str) -> Result<(), AppError> {
    let invalid = |reason: &str| AppError::InvalidUrl {
        url: candidate.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(candidate).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("Only HTTP and HTTPS protocols are allowed"));
    }

    let host = url.host_str().unwrap_or_default();
    if host.is_empty() {
        return Err(invalid("URL has no host"));
    }

    if !DOMAIN_REGEX.is_match(host) {
        return Err(invalid("Host is not a valid domain name"));
    }

    Ok(())
}
