//! Link entity representing a slug-to-destination mapping.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `slug`, `destination`, `owner` and `created_at` never change after
/// creation. `click_count` only grows, one step per resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub slug: String,
    pub destination: String,
    /// `None` only when authentication is disabled for the deployment.
    pub owner: Option<String>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        slug: String,
        destination: String,
        owner: Option<String>,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            slug,
            destination,
            owner,
            click_count,
            created_at,
        }
    }

    /// Returns true if `owner` may manage this link.
    ///
    /// A missing caller identity (authentication disabled) matches every link.
    pub fn is_owned_by(&self, owner: Option<&str>) -> bool {
        match owner {
            Some(owner) => self.owner.as_deref() == Some(owner),
            None => true,
        }
    }
}

/// Input data for inserting a new link.
///
/// `click_count` always starts at zero and is not part of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub slug: String,
    pub destination: String,
    pub owner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_owned_by(owner: Option<&str>) -> Link {
        Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            owner.map(str::to_string),
            0,
            Utc::now(),
        )
    }

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            Some("user-1".to_string()),
            3,
            now,
        );

        assert_eq!(link.slug, "abc123");
        assert_eq!(link.destination, "https://example.com");
        assert_eq!(link.owner.as_deref(), Some("user-1"));
        assert_eq!(link.click_count, 3);
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_is_owned_by_matching_owner() {
        let link = link_owned_by(Some("user-1"));
        assert!(link.is_owned_by(Some("user-1")));
        assert!(!link.is_owned_by(Some("user-2")));
    }

    #[test]
    fn test_is_owned_by_without_identity() {
        assert!(link_owned_by(Some("user-1")).is_owned_by(None));
        assert!(link_owned_by(None).is_owned_by(None));
        assert!(!link_owned_by(None).is_owned_by(Some("user-1")));
    }
}
