//! Click event model for asynchronous click counting.

/// A pending click-count increment.
///
/// Produced by the resolver after a destination has been determined and
/// consumed by [`crate::domain::click_worker::run_click_worker`]. Sending
/// never blocks the redirect: when the queue is full the event is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub slug: String,
}

impl ClickEvent {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let event = ClickEvent::new("abc123");
        assert_eq!(event.slug, "abc123");
    }

    #[test]
    fn test_click_event_clone() {
        let event = ClickEvent::new(String::from("xyz"));
        assert_eq!(event.clone(), event);
    }
}
