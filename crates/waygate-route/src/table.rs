//! The validated route table and per-navigation matching.

use crate::descriptor::RouteDescriptor;
use crate::target::{MatchedRoute, NavigationTarget};
use crate::MalformedRouteTable;
use std::collections::HashSet;

/// Ordered, validated set of route descriptors.
///
/// Built once at application start; immutable afterwards. Construction
/// checks the whole declaration up front so that navigation-time
/// matching can never fail:
///
/// - every full path is unique
/// - at most one catch-all, declared at the top level, with no children
///
/// Matching walks descriptors in declaration order and returns the
/// first full match, so a literal route that should win over a
/// parameter route (`/users/new` vs `/users/:id`) must be declared
/// before it. The catch-all is always tried last.
///
/// # Example
///
/// ```
/// use waygate_route::{MalformedRouteTable, RouteDescriptor, RoutePolicy, RouteTable, ViewId};
///
/// let err = RouteTable::new(vec![
///     RouteDescriptor::new("/login", ViewId::new("a"), RoutePolicy::GuestOnly).unwrap(),
///     RouteDescriptor::new("/login", ViewId::new("b"), RoutePolicy::Public).unwrap(),
/// ])
/// .unwrap_err();
/// assert!(matches!(err, MalformedRouteTable::DuplicatePath { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    catch_all: Option<RouteDescriptor>,
}

impl RouteTable {
    /// Validates the declared descriptors and builds the table.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRouteTable`] when two descriptors resolve to
    /// the same full path, more than one catch-all is declared, a
    /// catch-all has children, or a catch-all is nested.
    pub fn new(descriptors: Vec<RouteDescriptor>) -> Result<Self, MalformedRouteTable> {
        let mut seen = HashSet::new();
        let mut catch_all_path: Option<String> = None;

        for descriptor in &descriptors {
            let path = full_path("", descriptor);
            if descriptor.pattern().is_catch_all() {
                if let Some(first) = &catch_all_path {
                    return Err(MalformedRouteTable::MultipleCatchAll {
                        first: first.clone(),
                        second: path,
                    });
                }
                if !descriptor.children().is_empty() {
                    return Err(MalformedRouteTable::CatchAllWithChildren { path });
                }
                catch_all_path = Some(path.clone());
            }
            validate_subtree(descriptor, "", &mut seen)?;
        }

        let mut routes = descriptors;
        let pos = routes.iter().position(|d| d.pattern().is_catch_all());
        let catch_all = pos.map(|pos| routes.remove(pos));

        Ok(Self { routes, catch_all })
    }

    /// Resolves a requested path into a [`NavigationTarget`].
    ///
    /// Never fails: an unmatched path yields a target with an empty
    /// matched chain. The requested path is normalized (duplicate and
    /// trailing slashes collapse) before matching.
    #[must_use]
    pub fn resolve(&self, path: &str) -> NavigationTarget {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let normalized = if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", segments.join("/"))
        };

        for descriptor in &self.routes {
            if let Some(mut chain) = match_chain(descriptor, &segments, "") {
                // Most specific first: leaf before its ancestors.
                chain.reverse();
                return NavigationTarget::new(normalized, chain, false);
            }
        }

        if let Some(catch_all) = &self.catch_all {
            if catch_all.pattern().match_prefix(&segments).is_some() {
                let matched = MatchedRoute::new(
                    full_path("", catch_all),
                    catch_all.view().clone(),
                    catch_all.policy(),
                );
                return NavigationTarget::new(normalized, vec![matched], true);
            }
        }

        NavigationTarget::new(normalized, Vec::new(), false)
    }

    /// Total number of declared descriptors, children included.
    #[must_use]
    pub fn len(&self) -> usize {
        fn count(d: &RouteDescriptor) -> usize {
            1 + d.children().iter().map(count).sum::<usize>()
        }
        self.routes.iter().map(count).sum::<usize>() + usize::from(self.catch_all.is_some())
    }

    /// Returns `true` if no descriptors are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The catch-all descriptor, if one is declared.
    #[must_use]
    pub fn catch_all(&self) -> Option<&RouteDescriptor> {
        self.catch_all.as_ref()
    }
}

/// Full canonical path of a descriptor under `parent` ("" for roots).
fn full_path(parent: &str, descriptor: &RouteDescriptor) -> String {
    let suffix = descriptor.pattern().canonical_suffix();
    match (parent, suffix.as_str()) {
        ("" | "/", "") => "/".to_string(),
        ("" | "/", s) => format!("/{s}"),
        (p, "") => p.to_string(),
        (p, s) => format!("{p}/{s}"),
    }
}

fn validate_subtree(
    descriptor: &RouteDescriptor,
    parent: &str,
    seen: &mut HashSet<String>,
) -> Result<(), MalformedRouteTable> {
    let path = full_path(parent, descriptor);
    if !parent.is_empty() && descriptor.pattern().is_catch_all() {
        return Err(MalformedRouteTable::NestedCatchAll { path });
    }
    if !seen.insert(path.clone()) {
        return Err(MalformedRouteTable::DuplicatePath { path });
    }
    for child in descriptor.children() {
        validate_subtree(child, &path, seen)?;
    }
    Ok(())
}

/// Matches `descriptor` (and recursively its children) against the
/// remaining path segments. Returns the matched chain root-first, or
/// `None`. A match must consume the entire remainder, either here or in
/// a descendant.
fn match_chain(
    descriptor: &RouteDescriptor,
    segments: &[&str],
    parent: &str,
) -> Option<Vec<MatchedRoute>> {
    let consumed = descriptor.pattern().match_prefix(segments)?;
    let rest = &segments[consumed..];
    let path = full_path(parent, descriptor);

    for child in descriptor.children() {
        if let Some(mut chain) = match_chain(child, rest, &path) {
            chain.insert(
                0,
                MatchedRoute::new(path, descriptor.view().clone(), descriptor.policy()),
            );
            return Some(chain);
        }
    }

    if rest.is_empty() {
        return Some(vec![MatchedRoute::new(
            path,
            descriptor.view().clone(),
            descriptor.policy(),
        )]);
    }
    None
}
