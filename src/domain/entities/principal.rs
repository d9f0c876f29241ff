//! Authenticated caller identity.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A principal returned by identity verification.
///
/// `id` is the stable identifier stored as a link's owner.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            name: None,
        }
    }
}
