use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Coalesces a burst of values into a single action call.
///
/// Each `call` replaces the pending value and resets the timer; the action
/// runs with the newest value once `delay` passes with no further calls.
/// Dropping the debouncer flushes the pending value before the worker
/// exits, so the last state of a session is not lost.
pub struct Debouncer<T: Send + 'static> {
    tx: Sender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<T>();
        thread::spawn(move || {
            while let Ok(first) = rx.recv() {
                let mut latest = first;
                loop {
                    match rx.recv_timeout(delay) {
                        // A newer value supersedes the pending one.
                        Ok(next) => latest = next,
                        Err(RecvTimeoutError::Timeout) => {
                            action(latest);
                            break;
                        }
                        Err(RecvTimeoutError::Disconnected) => {
                            action(latest);
                            return;
                        }
                    }
                }
            }
        });
        Debouncer { tx }
    }

    /// Schedule `value`, cancelling any pending one.
    pub fn call(&self, value: T) {
        // Send fails only if the worker is gone, at which point there is
        // nothing left to persist to.
        let _ = self.tx.send(value);
    }
}
