//! End-to-end gate scenario: one route table, a session that moves
//! from unknown through anonymous to authenticated, and the decisions
//! the guard hands the router at each step.

use std::sync::Arc;
use std::time::Duration;
use waygate_guard::{
    decision_channel, GateConfig, GuardDecision, NavigationGuard, NavigationRequest,
};
use waygate_session::testing::ClosedStreamProvider;
use waygate_session::{Identity, SessionFeed};

/// The application's declaration: protected home, guest-only login and
/// signup, a catch-all that turns signed-in wanderers back home.
const GATE_TOML: &str = r#"
[redirects]
login = "/login"
home = "/"

[[routes]]
path = "/"
view = "home"
policy = "protected"

[[routes]]
path = "/login"
view = "login"
policy = "guest-only"

[[routes]]
path = "/signup"
view = "signup"
policy = "guest-only"

[[routes]]
path = "/*"
view = "not-found"
policy = "guest-only"
"#;

fn gate(feed: Arc<SessionFeed>) -> NavigationGuard {
    let config = GateConfig::from_toml(GATE_TOML).expect("declaration parses");
    NavigationGuard::from_config(feed, &config).expect("declaration validates")
}

async fn navigate(guard: &NavigationGuard, to: &str, from: &str) -> GuardDecision {
    let (sink, pending) = decision_channel();
    guard
        .before_navigation(NavigationRequest::new(to).with_from(from), sink)
        .await;
    pending.wait().await.expect("guard always delivers")
}

#[tokio::test]
async fn anonymous_visitor_is_walled_off_from_home() {
    let feed = Arc::new(SessionFeed::new());
    let guard = gate(Arc::clone(&feed));
    feed.sign_out();

    assert_eq!(
        navigate(&guard, "/", "/login").await,
        GuardDecision::redirect("/login")
    );
    assert_eq!(navigate(&guard, "/login", "/").await, GuardDecision::Proceed);
    assert_eq!(
        navigate(&guard, "/signup", "/login").await,
        GuardDecision::Proceed
    );
}

#[tokio::test]
async fn authenticated_visitor_is_kept_off_guest_surfaces() {
    let feed = Arc::new(SessionFeed::new());
    let guard = gate(Arc::clone(&feed));
    feed.sign_in(Identity::new("u1"));

    assert_eq!(navigate(&guard, "/", "/login").await, GuardDecision::Proceed);
    assert_eq!(
        navigate(&guard, "/login", "/").await,
        GuardDecision::redirect("/")
    );
    assert_eq!(
        navigate(&guard, "/unknownpath", "/").await,
        GuardDecision::redirect("/")
    );
}

#[tokio::test]
async fn first_navigation_waits_out_the_unknown_session() {
    let feed = Arc::new(SessionFeed::new());
    let guard = Arc::new(gate(Arc::clone(&feed)));

    // Navigation starts before the identity backend has answered.
    let in_flight = {
        let guard = Arc::clone(&guard);
        tokio::spawn(async move { guard.decide("/").await })
    };
    tokio::task::yield_now().await;

    feed.sign_out();

    assert_eq!(
        in_flight.await.unwrap(),
        GuardDecision::redirect("/login")
    );
}

#[tokio::test]
async fn full_session_lifecycle_drives_the_expected_decisions() {
    let feed = Arc::new(SessionFeed::new());
    let guard = Arc::new(gate(Arc::clone(&feed)));

    // Session still unknown: the first decision waits for it.
    let first = {
        let guard = Arc::clone(&guard);
        tokio::spawn(async move { guard.decide("/").await })
    };
    tokio::task::yield_now().await;
    feed.sign_out();
    assert_eq!(first.await.unwrap(), GuardDecision::redirect("/login"));

    // Anonymous from here on: login is reachable.
    assert_eq!(guard.decide("/login").await, GuardDecision::Proceed);

    // Sign-in flips both surfaces.
    feed.sign_in(Identity::new("u1"));
    assert_eq!(guard.decide("/login").await, GuardDecision::redirect("/"));
    assert_eq!(
        guard.decide("/unknownpath").await,
        GuardDecision::redirect("/")
    );

    // Sign-out restores the anonymous view of the world.
    feed.sign_out();
    assert_eq!(guard.decide("/").await, GuardDecision::redirect("/login"));
}

#[tokio::test]
async fn rapid_navigations_each_get_their_own_decision() {
    let feed = Arc::new(SessionFeed::new());
    let guard = Arc::new(gate(Arc::clone(&feed)));

    // Three back-to-back attempts while the session is still unknown;
    // none is cancelled, each resolves independently.
    let attempts: Vec<_> = ["/", "/login", "/signup"]
        .into_iter()
        .map(|path| {
            let guard = Arc::clone(&guard);
            tokio::spawn(async move { guard.decide(path).await })
        })
        .collect();
    tokio::task::yield_now().await;

    feed.sign_in(Identity::new("u1"));

    let mut decisions = Vec::new();
    for attempt in attempts {
        decisions.push(attempt.await.unwrap());
    }
    assert_eq!(
        decisions,
        vec![
            GuardDecision::Proceed,
            GuardDecision::redirect("/"),
            GuardDecision::redirect("/"),
        ]
    );
    assert_eq!(feed.subscription_count(), 0);
}

#[tokio::test]
async fn broken_session_stream_still_yields_a_decision_in_bounded_time() {
    let config = GateConfig::from_toml(GATE_TOML).unwrap();
    let guard = NavigationGuard::from_config(Arc::new(ClosedStreamProvider), &config).unwrap();

    let decision = tokio::time::timeout(Duration::from_millis(200), async {
        let (sink, pending) = decision_channel();
        guard
            .before_navigation(NavigationRequest::new("/"), sink)
            .await;
        pending.wait().await
    })
    .await
    .expect("decision must arrive in bounded time");

    // Degraded to anonymous: the protected home redirects to login.
    assert_eq!(decision, Some(GuardDecision::redirect("/login")));
}

#[tokio::test]
async fn repeated_navigation_is_idempotent() {
    let feed = Arc::new(SessionFeed::new());
    let guard = gate(Arc::clone(&feed));
    feed.sign_in(Identity::new("u1"));

    let first = navigate(&guard, "/login", "/").await;
    let second = navigate(&guard, "/login", "/").await;
    assert_eq!(first, second);
}
