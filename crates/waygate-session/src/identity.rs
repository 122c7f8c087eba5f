//! Authenticated user identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who an authenticated session belongs to.
///
/// Carried inside [`SessionSnapshot::Authenticated`](crate::SessionSnapshot::Authenticated).
/// The gate only cares that an identity exists; the fields are for
/// logging and for whatever consumes the session downstream.
///
/// # Example
///
/// ```
/// use waygate_session::Identity;
///
/// let identity = Identity::new("uid-1").with_email("ada@example.com");
/// assert_eq!(identity.uid(), "uid-1");
/// assert_eq!(identity.email(), Some("ada@example.com"));
/// assert_eq!(identity.display_name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable unique id assigned by the identity backend.
    uid: String,
    /// Primary email address, if the backend reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Human-readable name, if the backend reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

impl Identity {
    /// Creates an identity from its backend uid.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// The backend-assigned unique id.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// The email address, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The display name, if known.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name.as_deref().or(self.email.as_deref()) {
            Some(name) => write!(f, "{name} ({})", self.uid),
            None => f.write_str(&self.uid),
        }
    }
}
