//! Handle to an in-flight request.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::KrakenError;

/// A request that has been enqueued on the runtime.
///
/// The underlying task starts immediately; the handle is how the
/// caller collects the outcome. Awaiting the handle directly is the
/// common path:
///
/// ```ignore
/// let time = client.server_time().enqueue().await?;
/// ```
///
/// [`wait_timeout`](Self::wait_timeout) bounds the wait, and
/// [`cancel`](Self::cancel) aborts the task. Cancellation wins: once
/// `cancel` has been called, the handle resolves to
/// [`KrakenError::Cancelled`] even if the response had already
/// arrived.
pub struct RequestHandle<T> {
    state: State<T>,
}

enum State<T> {
    /// Requests rejected before dispatch resolve without a task.
    Ready(Result<T, KrakenError>),
    Pending {
        task: JoinHandle<Result<T, KrakenError>>,
        cancelled: AtomicBool,
    },
}

impl<T: Send + 'static> RequestHandle<T> {
    /// A handle that resolves immediately, without touching the
    /// network. Used for requests rejected at build time.
    pub(crate) fn ready(result: Result<T, KrakenError>) -> Self {
        Self { state: State::Ready(result) }
    }

    /// Spawn the dispatch future onto the current runtime.
    pub(crate) fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, KrakenError>> + Send + 'static,
    {
        Self {
            state: State::Pending {
                task: tokio::spawn(future),
                cancelled: AtomicBool::new(false),
            },
        }
    }

    /// Abort the request. Safe to call at any point, including after
    /// completion; any subsequent wait observes `Cancelled`.
    pub fn cancel(&self) {
        if let State::Pending { task, cancelled } = &self.state {
            cancelled.store(true, Ordering::Release);
            task.abort();
        }
    }

    /// True once a result is available (or the task was aborted).
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Ready(_) => true,
            State::Pending { task, .. } => task.is_finished(),
        }
    }

    /// Wait for the request to complete.
    pub async fn wait(self) -> Result<T, KrakenError> {
        match self.state {
            State::Ready(result) => result,
            State::Pending { task, cancelled } => {
                let outcome = task.await;
                if cancelled.load(Ordering::Acquire) {
                    return Err(KrakenError::Cancelled);
                }
                match outcome {
                    Ok(result) => result,
                    Err(err) if err.is_cancelled() => Err(KrakenError::Cancelled),
                    Err(err) => std::panic::resume_unwind(err.into_panic()),
                }
            }
        }
    }

    /// Wait, but give up after `timeout`. The request itself keeps
    /// running; only this wait is abandoned.
    pub async fn wait_timeout(self, timeout: Duration) -> Result<T, KrakenError> {
        match tokio::time::timeout(timeout, self.wait()).await {
            Ok(result) => result,
            Err(_) => Err(KrakenError::Timeout),
        }
    }
}

impl<T: Send + 'static> IntoFuture for RequestHandle<T> {
    type Output = Result<T, KrakenError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_handle_resolves_without_a_runtime_task() {
        let handle = RequestHandle::ready(Ok(7u32));
        assert!(handle.is_finished());
        assert_eq!(handle.wait().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn cancel_wins_even_after_completion() {
        let handle = RequestHandle::spawn(async { Ok(1u32) });
        // Let the task run to completion before cancelling.
        tokio::task::yield_now().await;
        handle.cancel();
        assert!(matches!(handle.wait().await, Err(KrakenError::Cancelled)));
    }

    #[tokio::test]
    async fn cancel_aborts_a_pending_task() {
        let handle = RequestHandle::<u32>::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        });
        handle.cancel();
        assert!(matches!(handle.wait().await, Err(KrakenError::Cancelled)));
    }

    #[tokio::test]
    async fn wait_timeout_reports_timeout() {
        let handle = RequestHandle::<u32>::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        });
        let result = handle.wait_timeout(Duration::from_millis(10)).await;
        assert!(matches!(result, Err(KrakenError::Timeout)));
    }

    #[tokio::test]
    async fn handle_is_awaitable_directly() {
        let handle = RequestHandle::spawn(async { Ok("done") });
        assert_eq!(handle.await.unwrap(), "done");
    }
}
