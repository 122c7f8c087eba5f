//! Route descriptors: one declared entry in the route table.

use crate::{MalformedRouteTable, RoutePattern, RoutePolicy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to the view a route renders.
///
/// The gate never looks inside it; it only carries the handle through
/// to whatever consumes the matched target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    /// Creates a view handle from its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The view's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One declared route: a path pattern, the view it renders, the access
/// policy that gates it, and optional nested children.
///
/// Descriptors are created at application start and are immutable once
/// the [`RouteTable`](crate::RouteTable) owning them is built. Children
/// use patterns relative to their parent; a target that matches a child
/// also matches every ancestor on the way down, which is what lets a
/// parent's `Protected` policy cover its whole subtree.
///
/// # Example
///
/// ```
/// use waygate_route::{RouteDescriptor, RoutePolicy, ViewId};
///
/// let account = RouteDescriptor::new("/account", ViewId::new("account"), RoutePolicy::Protected)
///     .unwrap()
///     .with_child(
///         RouteDescriptor::new("settings", ViewId::new("settings"), RoutePolicy::Public).unwrap(),
///     );
/// assert_eq!(account.children().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pattern: RoutePattern,
    view: ViewId,
    policy: RoutePolicy,
    children: Vec<RouteDescriptor>,
}

impl RouteDescriptor {
    /// Creates a descriptor with no children.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRouteTable::InvalidPattern`] if the pattern
    /// string does not parse.
    pub fn new(
        pattern: impl AsRef<str>,
        view: ViewId,
        policy: RoutePolicy,
    ) -> Result<Self, MalformedRouteTable> {
        Ok(Self {
            pattern: RoutePattern::parse(pattern)?,
            view,
            policy,
            children: Vec::new(),
        })
    }

    /// Adds a nested child route. The child's pattern is relative to
    /// this descriptor's path.
    #[must_use]
    pub fn with_child(mut self, child: RouteDescriptor) -> Self {
        self.children.push(child);
        self
    }

    /// The descriptor's path pattern.
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// The view this route renders.
    #[must_use]
    pub fn view(&self) -> &ViewId {
        &self.view
    }

    /// The access policy gating this route.
    #[must_use]
    pub fn policy(&self) -> RoutePolicy {
        self.policy
    }

    /// Nested child routes.
    #[must_use]
    pub fn children(&self) -> &[RouteDescriptor] {
        &self.children
    }
}
