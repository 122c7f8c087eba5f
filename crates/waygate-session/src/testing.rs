//! Scripted providers for exercising session resolution.
//!
//! Available to this crate's own tests and, behind the `test-utils`
//! feature, to downstream crates' tests. Nothing here is part of the
//! production surface.

use crate::{SessionEvents, SessionProvider, SessionSnapshot};
use tokio::sync::broadcast;

/// Provider whose change stream closes without ever yielding.
///
/// `current()` stays [`SessionSnapshot::Unknown`], so a resolution is
/// forced onto the stream and must take the error path.
///
/// # Example
///
/// ```
/// use waygate_session::testing::ClosedStreamProvider;
/// use waygate_session::{resolve_current_session, SessionResolutionError};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let result = resolve_current_session(&ClosedStreamProvider).await;
/// assert_eq!(result, Err(SessionResolutionError::StreamClosed));
/// # });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedStreamProvider;

impl SessionProvider for ClosedStreamProvider {
    fn current(&self) -> SessionSnapshot {
        SessionSnapshot::Unknown
    }

    fn subscribe(&self) -> SessionEvents {
        let (tx, rx) = broadcast::channel(1);
        drop(tx);
        SessionEvents::new(rx)
    }
}

/// Provider that replays a fixed script into every new subscription.
///
/// `current()` always answers with the configured initial snapshot; the
/// script only flows through the change stream. That split lets tests
/// steer a resolution down the subscribe path (initial `Unknown`) or
/// the immediate path (initial definite) at will.
///
/// After the script is exhausted the stream stays open, so a resolver
/// that ignores the scripted snapshots will wait, not error.
#[derive(Debug)]
pub struct ScriptedProvider {
    initial: SessionSnapshot,
    script: Vec<SessionSnapshot>,
    changes: broadcast::Sender<SessionSnapshot>,
}

impl ScriptedProvider {
    /// Creates a provider answering `initial` from `current()` and
    /// replaying `script` into each subscription.
    #[must_use]
    pub fn new(initial: SessionSnapshot, script: Vec<SessionSnapshot>) -> Self {
        let (changes, _) = broadcast::channel(script.len().max(1));
        Self {
            initial,
            script,
            changes,
        }
    }
}

impl SessionProvider for ScriptedProvider {
    fn current(&self) -> SessionSnapshot {
        self.initial.clone()
    }

    fn subscribe(&self) -> SessionEvents {
        let events = SessionEvents::new(self.changes.subscribe());
        for snapshot in &self.script {
            let _ = self.changes.send(snapshot.clone());
        }
        events
    }
}
