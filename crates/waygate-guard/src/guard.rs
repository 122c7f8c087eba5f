//! The navigation guard.

use crate::{DecisionSink, GateConfig, GuardDecision, RedirectTargets};
use std::sync::Arc;
use tracing::{debug, warn};
use waygate_route::{MalformedRouteTable, NavigationTarget, RouteTable};
use waygate_session::{resolve_current_session, SessionProvider, SessionSnapshot};

/// One navigation attempt as the router reports it.
///
/// The `(to, from)` pair of the router's before-commit hook. `from` is
/// absent for the very first navigation of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    to: String,
    from: Option<String>,
}

impl NavigationRequest {
    /// Creates a request for the given target path.
    #[must_use]
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: None,
        }
    }

    /// Sets the path being navigated away from.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// The requested target path.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// The previous location, if there was one.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }
}

/// Decides, before every navigation commit, whether to proceed or
/// redirect.
///
/// The guard holds no per-navigation state: each [`decide`](Self::decide)
/// call resolves the session on its own, reads the route table, and
/// produces exactly one [`GuardDecision`]. Concurrent navigations run
/// independent resolutions; the router sequences which decision takes
/// effect.
///
/// Every internal error is contained here. A failed session resolution
/// is logged and degrades to an anonymous session, so the worst
/// user-visible outcome of any failure is a redirect to the login
/// surface, never a hung navigation.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use waygate_guard::NavigationGuard;
/// use waygate_route::{RouteDescriptor, RoutePolicy, RouteTable, ViewId};
/// use waygate_session::SessionFeed;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let table = RouteTable::new(vec![
///     RouteDescriptor::new("/", ViewId::new("home"), RoutePolicy::Protected).unwrap(),
/// ])
/// .unwrap();
///
/// let feed = Arc::new(SessionFeed::new());
/// feed.sign_out();
///
/// let guard = NavigationGuard::new(feed, table);
/// let decision = guard.decide("/").await;
/// assert_eq!(decision.redirect_target(), Some("/login"));
/// # });
/// ```
pub struct NavigationGuard {
    provider: Arc<dyn SessionProvider>,
    table: RouteTable,
    redirects: RedirectTargets,
}

impl NavigationGuard {
    /// Creates a guard over a provider and a validated route table,
    /// with the default redirect targets.
    #[must_use]
    pub fn new(provider: Arc<dyn SessionProvider>, table: RouteTable) -> Self {
        Self {
            provider,
            table,
            redirects: RedirectTargets::default(),
        }
    }

    /// Replaces the redirect targets.
    #[must_use]
    pub fn with_redirects(mut self, redirects: RedirectTargets) -> Self {
        self.redirects = redirects;
        self
    }

    /// Builds a guard from a declarative [`GateConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRouteTable`] if the configured routes do not
    /// validate. Fatal at application start; never produced per
    /// navigation.
    pub fn from_config(
        provider: Arc<dyn SessionProvider>,
        config: &GateConfig,
    ) -> Result<Self, MalformedRouteTable> {
        let (table, redirects) = config.build()?;
        Ok(Self::new(provider, table).with_redirects(redirects))
    }

    /// The guard's route table.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The guard's redirect targets.
    #[must_use]
    pub fn redirects(&self) -> &RedirectTargets {
        &self.redirects
    }

    /// Decides one navigation to `path`.
    ///
    /// Resolves the session (waiting while it is still unknown), then
    /// applies the precedence rules over the matched descriptors:
    /// protected-without-session redirects to login, guest-only-with-
    /// session redirects to home, a path nothing matched redirects by
    /// session, anything else proceeds.
    pub async fn decide(&self, path: &str) -> GuardDecision {
        let session = match resolve_current_session(self.provider.as_ref()).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(
                    code = err.code(),
                    path,
                    error = %err,
                    "session resolution failed; deciding as anonymous"
                );
                SessionSnapshot::Anonymous
            }
        };

        let target = self.table.resolve(path);
        self.apply_rules(&target, &session)
    }

    /// The router integration point: decides `request` and delivers the
    /// outcome through `sink`.
    ///
    /// Delivery happens exactly once. The sink's consuming `deliver`
    /// rules out a second call, and because [`decide`](Self::decide)
    /// contains every error, no path through this method drops the sink
    /// undelivered.
    pub async fn before_navigation(&self, request: NavigationRequest, sink: DecisionSink) {
        let decision = self.decide(request.to()).await;
        debug!(
            to = request.to(),
            from = request.from().unwrap_or("-"),
            decision = %decision,
            "navigation decided"
        );
        sink.deliver(decision);
    }

    /// Precedence rules, first match wins.
    fn apply_rules(&self, target: &NavigationTarget, session: &SessionSnapshot) -> GuardDecision {
        let authenticated = session.is_authenticated();

        if target.requires_auth() && !authenticated {
            return GuardDecision::redirect(self.redirects.login());
        }
        if target.guest_only() && authenticated {
            return GuardDecision::redirect(self.redirects.home());
        }
        if target.is_unmatched() {
            // Not even the catch-all applied; send the user somewhere
            // that exists.
            let fallback = if authenticated {
                self.redirects.home()
            } else {
                self.redirects.login()
            };
            return GuardDecision::redirect(fallback);
        }
        GuardDecision::Proceed
    }
}

impl std::fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("routes", &self.table.len())
            .field("redirects", &self.redirects)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waygate_route::{RouteDescriptor, RoutePolicy, ViewId};
    use waygate_session::testing::ClosedStreamProvider;
    use waygate_session::{Identity, SessionFeed};

    fn route(path: &str, policy: RoutePolicy) -> RouteDescriptor {
        RouteDescriptor::new(path, ViewId::new(path.trim_matches('/')), policy).expect("pattern")
    }

    fn guard_with(routes: Vec<RouteDescriptor>, feed: Arc<SessionFeed>) -> NavigationGuard {
        let table = RouteTable::new(routes).expect("valid table");
        NavigationGuard::new(feed, table)
    }

    fn signed_out_feed() -> Arc<SessionFeed> {
        let feed = Arc::new(SessionFeed::new());
        feed.sign_out();
        feed
    }

    fn signed_in_feed() -> Arc<SessionFeed> {
        let feed = Arc::new(SessionFeed::new());
        feed.sign_in(Identity::new("u1"));
        feed
    }

    #[tokio::test]
    async fn protected_route_with_session_proceeds() {
        let guard = guard_with(vec![route("/", RoutePolicy::Protected)], signed_in_feed());
        assert_eq!(guard.decide("/").await, GuardDecision::Proceed);
    }

    #[tokio::test]
    async fn protected_route_without_session_redirects_to_login() {
        let guard = guard_with(vec![route("/", RoutePolicy::Protected)], signed_out_feed());
        assert_eq!(guard.decide("/").await, GuardDecision::redirect("/login"));
    }

    #[tokio::test]
    async fn guest_only_route_with_session_redirects_home() {
        let guard = guard_with(
            vec![route("/login", RoutePolicy::GuestOnly)],
            signed_in_feed(),
        );
        assert_eq!(guard.decide("/login").await, GuardDecision::redirect("/"));
    }

    #[tokio::test]
    async fn guest_only_route_without_session_proceeds() {
        let guard = guard_with(
            vec![route("/login", RoutePolicy::GuestOnly)],
            signed_out_feed(),
        );
        assert_eq!(guard.decide("/login").await, GuardDecision::Proceed);
    }

    #[tokio::test]
    async fn public_route_proceeds_either_way() {
        let guard = guard_with(vec![route("/about", RoutePolicy::Public)], signed_out_feed());
        assert_eq!(guard.decide("/about").await, GuardDecision::Proceed);

        let guard = guard_with(vec![route("/about", RoutePolicy::Public)], signed_in_feed());
        assert_eq!(guard.decide("/about").await, GuardDecision::Proceed);
    }

    #[tokio::test]
    async fn unmatched_path_redirects_by_session() {
        let routes = vec![route("/", RoutePolicy::Protected)];

        let guard = guard_with(routes.clone(), signed_out_feed());
        assert_eq!(
            guard.decide("/nowhere").await,
            GuardDecision::redirect("/login")
        );

        let guard = guard_with(routes, signed_in_feed());
        assert_eq!(guard.decide("/nowhere").await, GuardDecision::redirect("/"));
    }

    #[tokio::test]
    async fn matching_catch_all_uses_its_own_policy_not_the_unmatched_rule() {
        // A protected catch-all: anonymous users get the login
        // redirect from the protected rule, authenticated ones proceed
        // (the unmatched rule would have sent them home).
        let routes = vec![route("/*", RoutePolicy::Protected)];

        let guard = guard_with(routes.clone(), signed_out_feed());
        assert_eq!(
            guard.decide("/anything").await,
            GuardDecision::redirect("/login")
        );

        let guard = guard_with(routes, signed_in_feed());
        assert_eq!(guard.decide("/anything").await, GuardDecision::Proceed);
    }

    #[tokio::test]
    async fn protected_wins_over_guest_only_in_a_chain() {
        // Protected parent, guest-only child: rule order puts the
        // login redirect first for anonymous sessions.
        let routes = vec![route("/account", RoutePolicy::Protected)
            .with_child(route("invite", RoutePolicy::GuestOnly))];

        let guard = guard_with(routes.clone(), signed_out_feed());
        assert_eq!(
            guard.decide("/account/invite").await,
            GuardDecision::redirect("/login")
        );

        // Authenticated: rule (a) passes, rule (b) fires.
        let guard = guard_with(routes, signed_in_feed());
        assert_eq!(
            guard.decide("/account/invite").await,
            GuardDecision::redirect("/")
        );
    }

    #[tokio::test]
    async fn failed_resolution_degrades_to_anonymous() {
        let table = RouteTable::new(vec![route("/", RoutePolicy::Protected)]).unwrap();
        let guard = NavigationGuard::new(Arc::new(ClosedStreamProvider), table);

        assert_eq!(guard.decide("/").await, GuardDecision::redirect("/login"));
    }

    #[tokio::test]
    async fn custom_redirect_targets() {
        let table = RouteTable::new(vec![route("/", RoutePolicy::Protected)]).unwrap();
        let guard = NavigationGuard::new(signed_out_feed(), table)
            .with_redirects(RedirectTargets::new("/auth/sign-in", "/dashboard"));

        assert_eq!(
            guard.decide("/").await,
            GuardDecision::redirect("/auth/sign-in")
        );
    }

    #[tokio::test]
    async fn decide_is_idempotent_for_unchanged_session_and_target() {
        let guard = guard_with(vec![route("/", RoutePolicy::Protected)], signed_out_feed());
        let first = guard.decide("/").await;
        let second = guard.decide("/").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn before_navigation_delivers_exactly_once() {
        let guard = guard_with(
            vec![route("/login", RoutePolicy::GuestOnly)],
            signed_out_feed(),
        );

        let (sink, pending) = crate::decision_channel();
        let request = NavigationRequest::new("/login").with_from("/");
        guard.before_navigation(request, sink).await;

        assert_eq!(pending.wait().await, Some(GuardDecision::Proceed));
    }

    #[tokio::test]
    async fn request_accessors() {
        let request = NavigationRequest::new("/login").with_from("/");
        assert_eq!(request.to(), "/login");
        assert_eq!(request.from(), Some("/"));
        assert_eq!(NavigationRequest::new("/x").from(), None);
    }
}
