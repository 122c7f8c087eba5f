//! Declarative gate configuration.
//!
//! All types implement [`Default`] for compile-time fallback values.

use crate::RedirectTargets;
use serde::{Deserialize, Serialize};
use waygate_route::{MalformedRouteTable, RouteDescriptor, RoutePolicy, RouteTable, ViewId};

/// The gate's whole static declaration: routes plus redirect targets.
///
/// Loaded once at application start; [`build`](Self::build) validates
/// it into the runtime types. A declaration that does not validate is
/// fatal there and then: the process must not begin serving
/// navigations with a malformed table.
///
/// # Serialization
///
/// Serializes to TOML for file storage. Every field is optional in the
/// file and falls back to its default.
///
/// # Example
///
/// ```
/// use waygate_guard::GateConfig;
///
/// let config = GateConfig::from_toml(
///     r#"
///     [redirects]
///     login = "/login"
///     home = "/"
///
///     [[routes]]
///     path = "/"
///     view = "home"
///     policy = "protected"
///
///     [[routes]]
///     path = "/login"
///     view = "login"
///     policy = "guest-only"
///     "#,
/// )
/// .unwrap();
///
/// let (table, redirects) = config.build().unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(redirects.login(), "/login");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Declared routes, in matching order.
    pub routes: Vec<RouteEntry>,

    /// Redirect targets.
    pub redirects: RedirectsConfig,
}

impl GateConfig {
    /// Creates a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Validates the declaration into a [`RouteTable`] and
    /// [`RedirectTargets`].
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRouteTable`] for an unparseable pattern, a
    /// duplicate full path, or a misdeclared catch-all.
    pub fn build(&self) -> Result<(RouteTable, RedirectTargets), MalformedRouteTable> {
        let descriptors = self
            .routes
            .iter()
            .map(RouteEntry::to_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        let table = RouteTable::new(descriptors)?;
        let redirects = RedirectTargets::new(&self.redirects.login, &self.redirects.home);
        Ok((table, redirects))
    }
}

/// One declared route in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Path pattern (`/users/:id`, trailing `*` for the catch-all).
    pub path: String,

    /// Name of the view the route renders.
    pub view: String,

    /// Access policy. Defaults to `public` when omitted.
    #[serde(default)]
    pub policy: RoutePolicy,

    /// Nested child routes with patterns relative to this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteEntry>,
}

impl RouteEntry {
    fn to_descriptor(&self) -> Result<RouteDescriptor, MalformedRouteTable> {
        let mut descriptor =
            RouteDescriptor::new(&self.path, ViewId::new(&self.view), self.policy)?;
        for child in &self.children {
            descriptor = descriptor.with_child(child.to_descriptor()?);
        }
        Ok(descriptor)
    }
}

/// Redirect target paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectsConfig {
    /// Where protected routes send unauthenticated sessions.
    pub login: String,

    /// Where guest-only routes send authenticated sessions.
    pub home: String,
}

impl Default for RedirectsConfig {
    fn default() -> Self {
        let defaults = RedirectTargets::default();
        Self {
            login: defaults.login().to_string(),
            home: defaults.home().to_string(),
        }
    }
}
