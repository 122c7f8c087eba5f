//! Route declarations and matching for the waygate navigation gate.
//!
//! This crate is the static half of the gate: a declarative, validated
//! table of path patterns, each carrying an opaque view handle and a
//! single access policy. It knows nothing about sessions or redirects.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  waygate-route   : RouteTable, RoutePolicy, targets ◄── HERE │
//! │  waygate-session : SessionSnapshot, SessionProvider          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  waygate-guard   : NavigationGuard, GuardDecision            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Matching Model
//!
//! A [`RouteTable`] is built once, at application start, from a tree of
//! [`RouteDescriptor`]s and is immutable afterwards. Construction
//! validates the whole tree and fails with [`MalformedRouteTable`]
//! rather than deferring problems to navigation time.
//!
//! Per navigation, [`RouteTable::resolve`] produces a
//! [`NavigationTarget`]: the chain of descriptors matched along the path
//! hierarchy (most specific first) plus the aggregate access flags the
//! guard decides on. A catch-all descriptor, if declared, is consulted
//! only after every other descriptor has failed to match, and is
//! returned alone.
//!
//! # Example
//!
//! ```
//! use waygate_route::{RouteDescriptor, RoutePolicy, RouteTable, ViewId};
//!
//! let table = RouteTable::new(vec![
//!     RouteDescriptor::new("/", ViewId::new("home"), RoutePolicy::Protected).unwrap(),
//!     RouteDescriptor::new("/login", ViewId::new("login"), RoutePolicy::GuestOnly).unwrap(),
//! ])
//! .unwrap();
//!
//! let target = table.resolve("/login");
//! assert!(target.guest_only());
//! assert!(!target.requires_auth());
//!
//! let target = table.resolve("/nowhere");
//! assert!(target.is_unmatched());
//! ```

mod descriptor;
mod error;
mod pattern;
mod policy;
mod table;
mod target;

pub use descriptor::{RouteDescriptor, ViewId};
pub use error::MalformedRouteTable;
pub use pattern::RoutePattern;
pub use policy::RoutePolicy;
pub use table::RouteTable;
pub use target::{MatchedRoute, NavigationTarget};
