//! Tolerant fan-out over independently fallible futures.
//!
//! Every future is polled on the caller's task; nothing is spawned. A failed
//! future becomes `None` in its own slot and never touches its siblings.

use std::fmt::Display;
use std::future::Future;

use futures::future::join_all;
use tracing::debug;

/// Awaits `future`, turning an error into `None`.
pub async fn settle<T, E, F>(what: &str, future: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match future.await {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(what, error = %err, "tolerated fetch failure");
            None
        }
    }
}

/// Awaits every future concurrently. Slot `i` of the result holds the outcome
/// of the `i`-th future, whatever order they complete in.
pub async fn settle_all<T, E, F, I>(what: &str, futures: I) -> Vec<Option<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    join_all(futures.into_iter().map(|future| settle(what, future))).await
}
