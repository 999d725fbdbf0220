//! Core types for the typed event library
//!
//! The library itself only fails in one way: asking an event to forget a
//! callback it never had. Errors raised by subscribers are their own types
//! and are passed through untouched by [`crate::Event::dispatch`].

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Errors that can occur while managing an event's subscriber list
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("callback is not subscribed to this event")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            EventError::NotFound.to_string(),
            "callback is not subscribed to this event"
        );
    }
}
