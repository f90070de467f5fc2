// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cancellable scheduled tasks.
//!
//! A [`Debouncer`] runs a task after a delay unless it is cancelled or
//! flushed first: `cancel` drops the task unrun, `flush` runs it
//! immediately. Dropping the handle cancels, which is what gives form
//! tabs their cancel-on-unmount behavior.

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Debounce window for form autosave.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Debounce window for search-as-you-type lookups.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Signals a pending debounce can receive.
enum Signal {
    /// Drop the task without running it.
    Cancel,
    /// Run the task now.
    Flush,
}

/// A handle to one scheduled task.
///
/// Each new edit replaces its predecessor: cancel the old handle,
/// schedule a new one. The task runs at most once.
pub struct Debouncer {
    tx: Option<oneshot::Sender<Signal>>,
    handle: JoinHandle<()>,
}

impl Debouncer {
    /// Schedules `task` to run after `delay`.
    pub fn schedule<F, Fut>(delay: Duration, task: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (tx, rx) = oneshot::channel::<Signal>();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(delay) => task().await,
                signal = rx => match signal {
                    Ok(Signal::Flush) => task().await,
                    // Cancelled explicitly or the handle was dropped.
                    Ok(Signal::Cancel) | Err(_) => {}
                },
            }
        });
        Self {
            tx: Some(tx),
            handle,
        }
    }

    /// Cancels the pending task. A task already running (or flushed) is
    /// unaffected.
    pub fn cancel(mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Signal::Cancel);
        }
    }

    /// Runs the pending task immediately and waits for it to finish.
    pub async fn flush(mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Signal::Flush);
        }
        let _ = (&mut self.handle).await;
    }

    /// Returns whether the scheduled task has finished (run or
    /// cancelled).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        // Dropping the sender closes the channel, which the select arm
        // treats as cancellation.
        self.tx.take();
    }
}
