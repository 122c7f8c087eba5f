//! Access policy attached to each route descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who may navigate to a route.
///
/// Exactly one policy per descriptor. The closed enum makes the guard's
/// precedence rules exhaustive: a route cannot be both protected and
/// guest-only, and a match statement over policies cannot silently skip
/// a case.
///
/// Serializes as a lowercase string (`"protected"`, `"guest-only"`,
/// `"public"`) for use in declarative route configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutePolicy {
    /// Navigable only with an authenticated session.
    Protected,
    /// Navigable only without one (login, signup).
    GuestOnly,
    /// Navigable by anyone. The default for unannotated routes.
    #[default]
    Public,
}

impl RoutePolicy {
    /// Returns `true` for [`RoutePolicy::Protected`].
    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Protected)
    }

    /// Returns `true` for [`RoutePolicy::GuestOnly`].
    #[must_use]
    pub fn is_guest_only(self) -> bool {
        matches!(self, Self::GuestOnly)
    }
}

impl fmt::Display for RoutePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Protected => "protected",
            Self::GuestOnly => "guest-only",
            Self::Public => "public",
        };
        f.write_str(s)
    }
}
