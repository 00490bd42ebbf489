//! Per-call deadline and cancellation.
//!
//! Every operation takes a [`Context`]. The context is checked once before
//! the request leaves the process, then raced against the exchange itself.

use std::future::pending;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

use crate::error::{IonqError, IonqResult};

/// Deadline and cancellation scope for a single call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

/// Fires the cancellation of every [`Context`] cloned from its pair.
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    /// Cancel in-flight and future calls using the paired context.
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

impl Context {
    /// No deadline, never cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// Expire `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Expire at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancel: None,
        }
    }

    /// Attach a cancel signal to this context.
    pub fn with_cancel(self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            deadline: self.deadline,
            cancel: Some(rx),
        };
        (ctx, CancelHandle(tx))
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline. `None` without a deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Whether the cancel handle has fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Fail fast if the context is already done.
    pub fn check(&self) -> IonqResult<()> {
        if self.is_cancelled() {
            return Err(IonqError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(IonqError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Run `fut` unless the deadline passes or the context is cancelled first.
    pub(crate) async fn run<T, F>(&self, fut: F) -> IonqResult<T>
    where
        F: Future<Output = IonqResult<T>>,
    {
        self.check()?;

        let expired = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        let cancelled = async {
            let Some(rx) = self.cancel.as_ref() else {
                return pending::<()>().await;
            };
            let mut rx = rx.clone();
            loop {
                let fired = *rx.borrow_and_update();
                if fired {
                    return;
                }
                // Sender dropped without firing: cancellation can no longer happen.
                if rx.changed().await.is_err() {
                    return pending::<()>().await;
                }
            }
        };

        tokio::select! {
            result = fut => result,
            () = expired => Err(IonqError::DeadlineExceeded),
            () = cancelled => Err(IonqError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_never_expires() {
        let ctx = Context::background();
        assert!(ctx.deadline().is_none());
        assert!(ctx.remaining().is_none());
        assert!(ctx.check().is_ok());
    }

    #[tokio::test]
    async fn test_zero_timeout_is_expired() {
        let ctx = Context::with_timeout(Duration::ZERO);
        assert!(matches!(ctx.check(), Err(IonqError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_cancel_handle() {
        let (ctx, handle) = Context::background().with_cancel();
        assert!(ctx.check().is_ok());

        handle.cancel();
        assert!(ctx.is_cancelled());
        assert!(matches!(ctx.check(), Err(IonqError::Cancelled)));
    }

    #[tokio::test]
    async fn test_run_completes_before_deadline() {
        let ctx = Context::with_timeout(Duration::from_secs(5));
        let value = ctx.run(async { Ok::<_, IonqError>(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_run_hits_deadline() {
        let ctx = Context::with_timeout(Duration::from_millis(20));
        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, IonqError>(())
            })
            .await;
        assert!(matches!(result, Err(IonqError::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn test_run_cancelled_in_flight() {
        let (ctx, handle) = Context::background().with_cancel();
        let task = tokio::spawn(async move {
            ctx.run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, IonqError>(())
            })
            .await
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(IonqError::Cancelled)));
    }

    #[tokio::test]
    async fn test_dropped_handle_does_not_cancel() {
        let (ctx, handle) = Context::background().with_cancel();
        drop(handle);
        let value = ctx.run(async { Ok::<_, IonqError>("done") }).await.unwrap();
        assert_eq!(value, "done");
    }
}
