//! Point-in-time session state.

use crate::Identity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the session provider knows about the user right now.
///
/// Produced continuously by a [`SessionProvider`](crate::SessionProvider);
/// consumers read it transiently and hold no long-lived reference to any
/// particular snapshot.
///
/// `Unknown` is distinct from `Anonymous`: `Unknown` means the identity
/// backend has not answered yet (first load), while `Anonymous` is a
/// definite "nobody is signed in". Navigation decisions are only ever
/// made against a definite snapshot; see
/// [`resolve_current_session`](crate::resolve_current_session).
///
/// # Example
///
/// ```
/// use waygate_session::{Identity, SessionSnapshot};
///
/// assert!(!SessionSnapshot::Unknown.is_definite());
/// assert!(SessionSnapshot::Anonymous.is_definite());
///
/// let session = SessionSnapshot::Authenticated(Identity::new("u1"));
/// assert!(session.is_definite());
/// assert!(session.is_authenticated());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum SessionSnapshot {
    /// The provider has not yet heard from the identity backend.
    #[default]
    Unknown,
    /// A user is signed in.
    Authenticated(Identity),
    /// Definitely nobody is signed in.
    Anonymous,
}

impl SessionSnapshot {
    /// Returns `true` unless the snapshot is [`SessionSnapshot::Unknown`].
    #[must_use]
    pub fn is_definite(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns `true` for [`SessionSnapshot::Authenticated`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unknown | Self::Anonymous => None,
        }
    }
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Authenticated(identity) => write!(f, "authenticated:{identity}"),
            Self::Anonymous => f.write_str("anonymous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unknown() {
        assert_eq!(SessionSnapshot::default(), SessionSnapshot::Unknown);
        assert!(!SessionSnapshot::default().is_definite());
    }

    #[test]
    fn predicates() {
        let authed = SessionSnapshot::Authenticated(Identity::new("u1"));
        assert!(authed.is_authenticated());
        assert!(authed.is_definite());
        assert_eq!(authed.identity().map(Identity::uid), Some("u1"));

        assert!(!SessionSnapshot::Anonymous.is_authenticated());
        assert!(SessionSnapshot::Anonymous.is_definite());
        assert!(SessionSnapshot::Anonymous.identity().is_none());

        assert!(!SessionSnapshot::Unknown.is_authenticated());
        assert!(SessionSnapshot::Unknown.identity().is_none());
    }

    #[test]
    fn serde_tags_the_state() {
        let json = serde_json::to_string(&SessionSnapshot::Anonymous).unwrap();
        assert_eq!(json, "{\"state\":\"anonymous\"}");

        let authed = SessionSnapshot::Authenticated(Identity::new("u1"));
        let json = serde_json::to_string(&authed).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, authed);
    }

    #[test]
    fn display_forms() {
        assert_eq!(SessionSnapshot::Unknown.to_string(), "unknown");
        assert_eq!(SessionSnapshot::Anonymous.to_string(), "anonymous");
        let authed = SessionSnapshot::Authenticated(Identity::new("u1"));
        assert_eq!(authed.to_string(), "authenticated:u1");
    }
}
