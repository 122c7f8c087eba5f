//! Session state and one-shot resolution for the waygate navigation gate.
//!
//! This crate is the asynchronous half of the gate: a point-in-time
//! [`SessionSnapshot`], the narrow [`SessionProvider`] interface the
//! gate consumes authentication through, an in-process [`SessionFeed`]
//! implementation, and the [`resolve_current_session`] helper that
//! bridges the eventually-consistent provider to a single definite
//! answer per navigation.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  waygate-route   : RouteTable, RoutePolicy, targets          │
//! │  waygate-session : SessionSnapshot, SessionProvider ◄── HERE │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  waygate-guard   : NavigationGuard, GuardDecision            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Resolution Model
//!
//! A provider starts [`SessionSnapshot::Unknown`] until the identity
//! backend first answers, then flips between `Authenticated` and
//! `Anonymous` for the rest of its life. [`resolve_current_session`]
//! turns that into a one-shot wait: peek, and only if the peek is
//! indefinite, subscribe and take the first definite snapshot off the
//! change stream. The subscription is scoped to the call; every exit
//! path releases it.
//!
//! # Example
//!
//! ```
//! use waygate_session::{resolve_current_session, Identity, SessionFeed};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let feed = SessionFeed::new();
//! feed.sign_in(Identity::new("u1").with_email("ada@example.com"));
//!
//! let snapshot = resolve_current_session(&feed).await.unwrap();
//! assert_eq!(snapshot.identity().unwrap().uid(), "u1");
//! # });
//! ```

mod error;
mod feed;
mod identity;
mod provider;
mod resolver;
mod snapshot;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::{SessionResolutionError, SubscriptionClosed};
pub use feed::SessionFeed;
pub use identity::Identity;
pub use provider::{SessionEvents, SessionProvider};
pub use resolver::resolve_current_session;
pub use snapshot::SessionSnapshot;
