//! In-process session provider.

use crate::{Identity, SessionEvents, SessionProvider, SessionSnapshot};
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

/// Default broadcast buffer per subscription. Session state changes are
/// rare; a slow subscriber that still overflows this just skips to the
/// latest snapshot.
const CHANGE_BUFFER: usize = 16;

/// In-process [`SessionProvider`] fed by the identity backend wiring.
///
/// Starts [`SessionSnapshot::Unknown`] and moves to a definite snapshot
/// once [`publish`](Self::publish) (or the [`sign_in`](Self::sign_in) /
/// [`sign_out`](Self::sign_out) shorthands) is first called. The feed is
/// the single writer; any number of subscriptions observe the changes.
///
/// # Example
///
/// ```
/// use waygate_session::{Identity, SessionFeed, SessionProvider, SessionSnapshot};
///
/// let feed = SessionFeed::new();
/// assert_eq!(feed.current(), SessionSnapshot::Unknown);
///
/// feed.sign_in(Identity::new("u1"));
/// assert!(feed.current().is_authenticated());
///
/// feed.sign_out();
/// assert_eq!(feed.current(), SessionSnapshot::Anonymous);
/// ```
#[derive(Debug)]
pub struct SessionFeed {
    current: RwLock<SessionSnapshot>,
    changes: broadcast::Sender<SessionSnapshot>,
}

impl SessionFeed {
    /// Creates a feed in the [`SessionSnapshot::Unknown`] state.
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self {
            current: RwLock::new(SessionSnapshot::Unknown),
            changes,
        }
    }

    /// Publishes a new snapshot to the peek slot and every subscription.
    ///
    /// The peek slot is updated before subscribers are notified, so
    /// `current()` never lags behind the change stream.
    pub fn publish(&self, snapshot: SessionSnapshot) {
        debug!(session = %snapshot, "session snapshot published");
        *self.current.write() = snapshot.clone();
        // Returns Err when no subscription is open; that is fine.
        let _ = self.changes.send(snapshot);
    }

    /// Publishes [`SessionSnapshot::Authenticated`] for `identity`.
    pub fn sign_in(&self, identity: Identity) {
        self.publish(SessionSnapshot::Authenticated(identity));
    }

    /// Publishes [`SessionSnapshot::Anonymous`].
    pub fn sign_out(&self) {
        self.publish(SessionSnapshot::Anonymous);
    }

    /// Number of currently open subscriptions.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.changes.receiver_count()
    }
}

impl Default for SessionFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for SessionFeed {
    fn current(&self) -> SessionSnapshot {
        self.current.read().clone()
    }

    fn subscribe(&self) -> SessionEvents {
        SessionEvents::new(self.changes.subscribe())
    }
}
