//! Trailing-edge debounce for interactive product search.

use std::time::Duration;

use futures::{Stream, StreamExt};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Calls `settle` with a query once `wait` has passed without a newer one.
/// When the input ends, a still-pending query is settled immediately.
pub async fn debounce<S, F>(mut input: S, wait: Duration, mut settle: F)
where
    S: Stream<Item = String> + Unpin,
    F: FnMut(String),
{
    let mut pending: Option<String> = None;
    loop {
        match pending.take() {
            None => match input.next().await {
                Some(query) => pending = Some(query),
                None => return,
            },
            Some(query) => {
                tokio::select! {
                    next = input.next() => match next {
                        Some(newer) => pending = Some(newer),
                        None => {
                            settle(query);
                            return;
                        }
                    },
                    () = tokio::time::sleep(wait) => settle(query),
                }
            }
        }
    }
}
