//! One-shot session resolution.

use crate::{SessionProvider, SessionResolutionError, SessionSnapshot};
use tracing::trace;

/// Resolves the current session to a definite snapshot, exactly once.
///
/// If the provider already has a definite snapshot it is returned
/// immediately, without touching the change stream. Otherwise a
/// subscription is opened and the first definite snapshot it yields is
/// returned. The subscription never outlives the call: it is released
/// on the value path, the re-peek shortcut, and the stream-error path
/// alike.
///
/// Concurrent calls are independent; each opens its own subscription
/// and they share no state.
///
/// # Errors
///
/// Returns [`SessionResolutionError::StreamClosed`] if the provider's
/// change stream ends before a definite snapshot arrives. Callers treat
/// that as an unauthenticated session; it is never a crash and never a
/// silent success.
///
/// # Example
///
/// ```
/// use waygate_session::{resolve_current_session, Identity, SessionFeed};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let feed = SessionFeed::new();
/// feed.sign_in(Identity::new("u1"));
///
/// let snapshot = resolve_current_session(&feed).await.unwrap();
/// assert!(snapshot.is_authenticated());
/// # });
/// ```
pub async fn resolve_current_session<P>(
    provider: &P,
) -> Result<SessionSnapshot, SessionResolutionError>
where
    P: SessionProvider + ?Sized,
{
    let snapshot = provider.current();
    if snapshot.is_definite() {
        return Ok(snapshot);
    }

    let mut events = provider.subscribe();

    // A snapshot published between the peek above and the subscribe
    // must not be lost: it would be invisible to the stream, so peek
    // again now that the subscription is open.
    let snapshot = provider.current();
    if snapshot.is_definite() {
        events.unsubscribe();
        return Ok(snapshot);
    }

    loop {
        match events.next().await {
            Ok(snapshot) if snapshot.is_definite() => {
                events.unsubscribe();
                return Ok(snapshot);
            }
            Ok(_) => {
                trace!("indefinite snapshot on change stream; still waiting");
            }
            Err(_closed) => {
                events.unsubscribe();
                return Err(SessionResolutionError::StreamClosed);
            }
        }
    }
}
