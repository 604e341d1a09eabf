//! Debounced render-on-demand service
//!
//! A frontend pushes an immutable settings snapshot on every control
//! change; the service waits until the stream goes quiet for the debounce
//! window, then hands the latest snapshot to the render callback. Rapid
//! slider movement therefore costs one render, not one per tick.
//!
//! This is the only scheduled machinery in the crate. Batch runs stay
//! synchronous on the caller's thread.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Debounce window applied between the last snapshot and the render.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Debounces settings snapshots into render requests
pub struct RenderService<S> {
    tx: mpsc::UnboundedSender<S>,
    task: Option<JoinHandle<()>>,
}

impl<S: Send + 'static> RenderService<S> {
    /// Spawn the debounce task onto the current tokio runtime.
    ///
    /// `on_render` runs inside that task with the most recent snapshot
    /// once the stream has been quiet for `debounce`.
    pub fn spawn(debounce: Duration, mut on_render: impl FnMut(S) + Send + 'static) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<S>();

        let task = tokio::spawn(async move {
            let mut pending: Option<S> = None;
            loop {
                tokio::select! {
                    received = rx.recv() => match received {
                        Some(snapshot) => pending = Some(snapshot),
                        None => break,
                    },
                    // Re-armed on every received snapshot: the sleep only
                    // wins the race once the stream has gone quiet
                    () = tokio::time::sleep(debounce), if pending.is_some() => {
                        if let Some(snapshot) = pending.take() {
                            on_render(snapshot);
                        }
                    }
                }
            }
            // Sender dropped mid-burst: render the last snapshot instead
            // of losing it
            if let Some(snapshot) = pending.take() {
                on_render(snapshot);
            }
        });

        Self {
            tx,
            task: Some(task),
        }
    }

    /// Queue a settings snapshot. Returns false once the service has been
    /// shut down.
    pub fn request(&self, snapshot: S) -> bool {
        self.tx.send(snapshot).is_ok()
    }

    /// Stop the debounce task without waiting for a pending render.
    pub fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<S> Drop for RenderService<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn burst_of_snapshots_renders_once_with_the_latest() {
        let rendered: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&rendered);

        let service = RenderService::spawn(Duration::from_millis(30), move |snapshot| {
            sink.lock().unwrap().push(snapshot);
        });

        for snapshot in [1u32, 2, 3, 4, 5] {
            assert!(service.request(snapshot));
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(*rendered.lock().unwrap(), vec![5]);
    }

    #[tokio::test]
    async fn quiet_gaps_produce_separate_renders() {
        let rendered: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&rendered);

        let service = RenderService::spawn(Duration::from_millis(20), move |snapshot| {
            sink.lock().unwrap().push(snapshot);
        });

        service.request(1);
        tokio::time::sleep(Duration::from_millis(80)).await;
        service.request(2);
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(*rendered.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn requests_after_abort_are_rejected() {
        let mut service: RenderService<u32> =
            RenderService::spawn(Duration::from_millis(10), |_| {});
        service.abort();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!service.request(1));
    }
}
