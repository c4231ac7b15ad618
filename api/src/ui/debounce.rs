//! Debounced input binding
//!
//! Library form of the search box binding; the rendered page applies the
//! same `DEFAULT_DEBOUNCE` in its inline script. Mirrors an externally
//! controlled value and only reports local edits once they have settled
//! for `delay`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// A value that propagates to `on_change` after a quiet period
///
/// Must be used from within a tokio runtime: each `set` spawns the timer task.
pub struct DebouncedInput<T> {
    value: Arc<Mutex<T>>,
    delay: Duration,
    on_change: Callback<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T> DebouncedInput<T>
where
    T: Clone + Send + 'static,
{
    pub fn new<F>(initial: T, delay: Duration, on_change: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            value: Arc::new(Mutex::new(initial)),
            delay,
            on_change: Arc::new(on_change),
            pending: None,
        }
    }

    pub fn with_default_delay<F>(initial: T, on_change: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self::new(initial, DEFAULT_DEBOUNCE, on_change)
    }

    /// Current local value
    pub fn value(&self) -> T {
        match self.value.lock() {
            Ok(value) => value.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether a change is waiting for its timer
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Local edit: restart the timer with the new value
    pub fn set(&mut self, value: T) {
        self.cancel();
        self.store(value);

        let current = Arc::clone(&self.value);
        let on_change = Arc::clone(&self.on_change);
        // The window starts now, not when the timer task is first polled
        let deadline = tokio::time::Instant::now() + self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let settled = match current.lock() {
                Ok(value) => value.clone(),
                Err(poisoned) => poisoned.into_inner().clone(),
            };
            on_change(settled);
        }));
    }

    /// External value changed out-of-band: adopt it without reporting back
    pub fn sync(&mut self, value: T) {
        self.cancel();
        self.store(value);
    }

    fn store(&self, value: T) {
        match self.value.lock() {
            Ok(mut current) => *current = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for DebouncedInput<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
