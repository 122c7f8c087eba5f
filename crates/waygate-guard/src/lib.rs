//! The navigation guard for the waygate navigation gate.
//!
//! This crate is the decision core: it sits between the router's
//! "about to navigate" event and its "commit navigation" action,
//! reconciling an asynchronous, eventually-consistent session source
//! with one synchronous verdict per navigation attempt.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  waygate-route   : RouteTable, RoutePolicy, targets          │
//! │  waygate-session : SessionSnapshot, SessionProvider          │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  waygate-guard   : NavigationGuard, GuardDecision   ◄── HERE │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Decision Flow
//!
//! ```text
//! router ──(to, from, sink)──► NavigationGuard::before_navigation
//!                                   │
//!                                   ▼
//!                        resolve_current_session     (waits while Unknown)
//!                                   │
//!                                   ▼
//!                        RouteTable::resolve(to)     (matched chain + flags)
//!                                   │
//!                                   ▼
//!                        precedence rules            (exactly one decision)
//!                                   │
//!                                   ▼
//! router ◄──────────────── sink.deliver(decision)
//! ```
//!
//! Precedence, first match wins: a protected target without an
//! authenticated session redirects to login; a guest-only target with
//! one redirects to home; a target nothing matched redirects by
//! session; everything else proceeds. A failed session resolution is
//! contained and decided as anonymous, so no navigation ever hangs or
//! crashes on an internal error.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use waygate_guard::{decision_channel, GateConfig, GuardDecision, NavigationGuard, NavigationRequest};
//! use waygate_session::{Identity, SessionFeed};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let config = GateConfig::from_toml(
//!     r#"
//!     [[routes]]
//!     path = "/"
//!     view = "home"
//!     policy = "protected"
//!
//!     [[routes]]
//!     path = "/login"
//!     view = "login"
//!     policy = "guest-only"
//!     "#,
//! )
//! .unwrap();
//!
//! let feed = Arc::new(SessionFeed::new());
//! feed.sign_in(Identity::new("u1"));
//!
//! let guard = NavigationGuard::from_config(feed, &config).unwrap();
//!
//! let (sink, pending) = decision_channel();
//! guard
//!     .before_navigation(NavigationRequest::new("/login").with_from("/"), sink)
//!     .await;
//! assert_eq!(pending.wait().await, Some(GuardDecision::redirect("/")));
//! # });
//! ```

mod config;
mod decision;
mod guard;

pub use config::{GateConfig, RedirectsConfig, RouteEntry};
pub use decision::{decision_channel, DecisionSink, GuardDecision, PendingDecision, RedirectTargets};
pub use guard::{NavigationGuard, NavigationRequest};
