//! Cancellable trailing-edge debounce
//!
//! Each `schedule` aborts the pending timer and starts a new one. When the
//! quiet period elapses the value is sent on the channel returned by `new`,
//! or on the sender given to `with_sender`.
//! Dropping the debouncer aborts whatever is still pending.

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> (Self, UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::with_sender(delay, tx), rx)
    }

    /// Debouncers sharing one sender time out independently of each other
    pub fn with_sender(delay: Duration, tx: UnboundedSender<T>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    pub fn sender(&self) -> UnboundedSender<T> {
        self.tx.clone()
    }

    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(value);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_only_last_value_fires() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(350));

        debouncer.schedule("o".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("ot".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule("otp".to_string());

        tokio::time::sleep(Duration::from_millis(349)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await.as_deref(), Some("otp"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(50));
        debouncer.schedule(1);
        assert!(debouncer.pending.is_some());
        debouncer.cancel();
        assert!(debouncer.pending.is_none());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(50));
        debouncer.schedule(7);
        drop(debouncer);

        tokio::time::sleep(Duration::from_millis(100)).await;
        // Sender dropped with the debouncer and nothing was delivered
        assert_eq!(rx.recv().await, None);
    }
}
