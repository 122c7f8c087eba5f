//! Navigation targets: the per-navigation result of route matching.

use crate::{RoutePolicy, ViewId};

/// One descriptor matched along the path hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    path: String,
    view: ViewId,
    policy: RoutePolicy,
}

impl MatchedRoute {
    pub(crate) fn new(path: String, view: ViewId, policy: RoutePolicy) -> Self {
        Self { path, view, policy }
    }

    /// Full declared path of the matched descriptor.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The view the matched descriptor renders.
    #[must_use]
    pub fn view(&self) -> &ViewId {
        &self.view
    }

    /// The matched descriptor's access policy.
    #[must_use]
    pub fn policy(&self) -> RoutePolicy {
        self.policy
    }
}

/// What a requested path resolved to.
///
/// Derived at navigation time, read once by the guard, then dropped.
/// Holds the matched descriptor chain (most specific first: the leaf,
/// then its ancestors) and the aggregate access flags over that chain.
/// An empty chain means no descriptor matched and no catch-all applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    path: String,
    matched: Vec<MatchedRoute>,
    via_catch_all: bool,
}

impl NavigationTarget {
    pub(crate) fn new(path: String, matched: Vec<MatchedRoute>, via_catch_all: bool) -> Self {
        Self {
            path,
            matched,
            via_catch_all,
        }
    }

    /// The normalized requested path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Matched descriptors, most specific first.
    #[must_use]
    pub fn matched(&self) -> &[MatchedRoute] {
        &self.matched
    }

    /// `true` if any matched descriptor is [`RoutePolicy::Protected`].
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|m| m.policy().is_protected())
    }

    /// `true` if any matched descriptor is [`RoutePolicy::GuestOnly`].
    #[must_use]
    pub fn guest_only(&self) -> bool {
        self.matched.iter().any(|m| m.policy().is_guest_only())
    }

    /// `true` if nothing matched, not even a catch-all.
    #[must_use]
    pub fn is_unmatched(&self) -> bool {
        self.matched.is_empty()
    }

    /// `true` if the match came from the table's catch-all descriptor.
    #[must_use]
    pub fn via_catch_all(&self) -> bool {
        self.via_catch_all
    }
}
