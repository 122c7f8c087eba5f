//! The session provider interface and its subscription handle.

use crate::{SessionSnapshot, SubscriptionClosed};
use tokio::sync::broadcast;
use tracing::trace;

/// Source of session snapshots.
///
/// The gate consumes authentication state only through this interface:
/// a synchronous peek at the current snapshot plus a push-based change
/// stream. Implementations own the wiring to the actual identity
/// backend; [`SessionFeed`](crate::SessionFeed) is the in-process one.
///
/// Implementations must publish every snapshot change to all active
/// subscriptions, and `current()` must never lag behind what has been
/// published.
pub trait SessionProvider: Send + Sync {
    /// The snapshot as of right now.
    fn current(&self) -> SessionSnapshot;

    /// Opens a change subscription.
    ///
    /// The returned [`SessionEvents`] only sees snapshots published
    /// after this call; pair it with a `current()` peek to avoid
    /// missing a change that raced the subscription.
    fn subscribe(&self) -> SessionEvents;
}

impl<P: SessionProvider + ?Sized> SessionProvider for std::sync::Arc<P> {
    fn current(&self) -> SessionSnapshot {
        (**self).current()
    }

    fn subscribe(&self) -> SessionEvents {
        (**self).subscribe()
    }
}

/// A scoped subscription to a provider's change stream.
///
/// This is the one leak-prone resource in the gate, so release is
/// unconditional: dropping the value releases the subscription, and
/// [`unsubscribe`](Self::unsubscribe) releases it explicitly and is
/// safe to call more than once.
///
/// A subscription that falls behind the publisher is not an error:
/// later snapshots supersede earlier ones, so missed intermediates are
/// skipped and [`next`](Self::next) keeps yielding.
#[derive(Debug)]
pub struct SessionEvents {
    rx: Option<broadcast::Receiver<SessionSnapshot>>,
}

impl SessionEvents {
    pub(crate) fn new(rx: broadcast::Receiver<SessionSnapshot>) -> Self {
        Self { rx: Some(rx) }
    }

    /// Waits for the next published snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionClosed`] once the provider side has gone
    /// away or after [`unsubscribe`](Self::unsubscribe) was called.
    pub async fn next(&mut self) -> Result<SessionSnapshot, SubscriptionClosed> {
        let rx = self.rx.as_mut().ok_or(SubscriptionClosed)?;
        loop {
            match rx.recv().await {
                Ok(snapshot) => return Ok(snapshot),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    trace!(missed, "session subscription lagged; skipping to latest");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    self.rx = None;
                    return Err(SubscriptionClosed);
                }
            }
        }
    }

    /// Releases the subscription. Idempotent.
    pub fn unsubscribe(&mut self) {
        self.rx = None;
    }

    /// Returns `true` while the subscription is still registered with
    /// the provider.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }
}
