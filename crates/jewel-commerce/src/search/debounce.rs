//! Debounced delivery of search input.
//!
//! Each pushed value restarts the quiet window; the handler runs once the
//! window elapses with no newer value, always with the latest one. Cancelling
//! or dropping the debouncer discards whatever is pending.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::CommerceError;

enum Command<T> {
    Push(T),
    Cancel,
}

/// Handle to a background debounce task.
///
/// Must be created inside a tokio runtime.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<Command<T>>,
    task: Option<JoinHandle<()>>,
    delay: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce task.
    pub fn spawn<F>(delay: Duration, handler: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(delay, rx, handler));
        Self {
            tx,
            task: Some(task),
            delay,
        }
    }

    /// Replace the pending value and restart the window.
    pub fn push(&self, value: T) -> Result<(), CommerceError> {
        self.tx
            .send(Command::Push(value))
            .map_err(|_| CommerceError::DebouncerClosed)
    }

    /// Drop the pending value, if any.
    pub fn cancel(&self) {
        let _ = self.tx.send(Command::Cancel);
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Stop the task, discarding anything pending, and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run<T, F>(delay: Duration, mut rx: mpsc::UnboundedReceiver<Command<T>>, mut handler: F)
where
    F: FnMut(T),
{
    let mut pending: Option<T> = None;

    loop {
        if pending.is_none() {
            match rx.recv().await {
                Some(Command::Push(value)) => pending = Some(value),
                Some(Command::Cancel) => {}
                None => break,
            }
            continue;
        }

        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                if let Some(value) = pending.take() {
                    handler(value);
                }
            }
            cmd = rx.recv() => match cmd {
                Some(Command::Push(value)) => pending = Some(value),
                Some(Command::Cancel) => pending = None,
                None => break,
            },
        }
    }
}
