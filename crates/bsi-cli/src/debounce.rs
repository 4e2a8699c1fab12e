//! Trailing-edge debounce for search input.

use std::time::Duration;

use tokio::sync::mpsc;

/// Forwards the last value of each burst once `delay` passes without a newer one.
///
/// A value arriving within the window restarts the timer and replaces the
/// pending one. When `input` closes, any pending value is flushed and the
/// returned receiver closes after it.
pub fn debounce<T: Send + 'static>(
    mut input: mpsc::Receiver<T>,
    delay: Duration,
) -> mpsc::Receiver<T> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut pending: Option<T> = None;
        loop {
            if pending.is_none() {
                match input.recv().await {
                    Some(value) => pending = Some(value),
                    None => break,
                }
                continue;
            }

            tokio::select! {
                next = input.recv() => match next {
                    Some(value) => {
                        tracing::trace!("debounce window restarted");
                        pending = Some(value);
                    }
                    None => {
                        if let Some(value) = pending.take() {
                            let _ = tx.send(value).await;
                        }
                        break;
                    }
                },
                () = tokio::time::sleep(delay) => {
                    if let Some(value) = pending.take() {
                        if tx.send(value).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });
    rx
}
