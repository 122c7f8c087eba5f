//! Guard decisions and their exactly-once delivery channel.

use std::fmt;
use tokio::sync::oneshot;

/// The guard's verdict on one navigation attempt.
///
/// Exactly one decision is produced per attempt. `RedirectTo` carries
/// the alternate path the router should commit instead; "abort" exists
/// in the router integration but the guard never uses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Commit the navigation unmodified.
    Proceed,
    /// Commit a navigation to this path instead.
    RedirectTo(String),
}

impl GuardDecision {
    /// Shorthand for [`GuardDecision::RedirectTo`].
    #[must_use]
    pub fn redirect(path: impl Into<String>) -> Self {
        Self::RedirectTo(path.into())
    }

    /// Returns `true` for [`GuardDecision::Proceed`].
    #[must_use]
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }

    /// The redirect path, if the decision is a redirect.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::RedirectTo(path) => Some(path),
            Self::Proceed => None,
        }
    }
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proceed => f.write_str("proceed"),
            Self::RedirectTo(path) => write!(f, "redirect:{path}"),
        }
    }
}

/// Where the guard sends users it turns away.
///
/// Defaults match the conventional surfaces: `/login` for sessions that
/// are missing, `/` for sessions that should not be on a guest-only
/// page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTargets {
    login: String,
    home: String,
}

impl RedirectTargets {
    /// Creates redirect targets from explicit paths.
    #[must_use]
    pub fn new(login: impl Into<String>, home: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            home: home.into(),
        }
    }

    /// Path of the login surface.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Path of the home surface.
    #[must_use]
    pub fn home(&self) -> &str {
        &self.home
    }
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self::new("/login", "/")
    }
}

/// Creates a linked [`DecisionSink`] / [`PendingDecision`] pair.
///
/// The router holds the [`PendingDecision`] and hands the sink to the
/// guard; the guard's single call to [`DecisionSink::deliver`] resolves
/// the pending side.
#[must_use]
pub fn decision_channel() -> (DecisionSink, PendingDecision) {
    let (tx, rx) = oneshot::channel();
    (DecisionSink { tx }, PendingDecision { rx })
}

/// Write half of a decision channel.
///
/// Delivery consumes the sink, so a second delivery for the same
/// navigation attempt does not typecheck. The guard guarantees the
/// complementary half: the sink is never dropped undelivered.
#[derive(Debug)]
pub struct DecisionSink {
    tx: oneshot::Sender<GuardDecision>,
}

impl DecisionSink {
    /// Delivers the decision to the waiting router.
    ///
    /// A router that stopped waiting (dropped its [`PendingDecision`])
    /// makes this a no-op; the decision simply has no effect any more.
    pub fn deliver(self, decision: GuardDecision) {
        let _ = self.tx.send(decision);
    }
}

/// Read half of a decision channel.
#[derive(Debug)]
pub struct PendingDecision {
    rx: oneshot::Receiver<GuardDecision>,
}

impl PendingDecision {
    /// Waits for the guard's decision.
    ///
    /// Returns `None` if the sink was dropped without delivering, which
    /// the guard itself never does.
    pub async fn wait(self) -> Option<GuardDecision> {
        self.rx.await.ok()
    }
}
