//! Session resolution errors.
//!
//! Everything here is recoverable: a failed resolution degrades the
//! navigation decision, it never crashes the navigation pipeline.

use thiserror::Error;

/// A one-shot session resolution could not produce a definite snapshot.
///
/// Callers recover locally by treating the session as anonymous for the
/// decision at hand. The error never propagates past the guard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionResolutionError {
    /// The provider's change stream closed before a definite snapshot
    /// arrived.
    #[error("session change stream closed before a definite snapshot arrived")]
    StreamClosed,
}

impl SessionResolutionError {
    /// Stable machine-readable code for logging and assertions.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::StreamClosed => "SESSION_STREAM_CLOSED",
        }
    }
}

/// The subscription's change stream has ended.
///
/// Returned by [`SessionEvents::next`](crate::SessionEvents::next) once
/// the provider side has gone away or the subscription was explicitly
/// released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("session subscription closed")]
pub struct SubscriptionClosed;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_upper_snake() {
        let err = SessionResolutionError::StreamClosed;
        assert_eq!(err.code(), "SESSION_STREAM_CLOSED");
        assert!(err.to_string().contains("stream closed"));
    }

    #[test]
    fn subscription_closed_display() {
        assert_eq!(SubscriptionClosed.to_string(), "session subscription closed");
    }
}
