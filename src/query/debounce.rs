//! Trailing-edge debounce for live input.
//!
//! The debouncer owns no timer. Callers push values with the current instant,
//! schedule a wake-up at [`Debouncer::deadline`], and call
//! [`Debouncer::poll`] when it fires. Wake-ups scheduled for values that have
//! since been superseded find the deadline pushed back and yield nothing.

use std::time::{Duration, Instant};

/// Default quiescence window.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Delays a value until input has been stable for a fixed window.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use orgview::query::Debouncer;
///
/// let mut debouncer = Debouncer::new(Duration::from_millis(500));
/// let start = Instant::now();
/// debouncer.push("f", start);
/// debouncer.push("fa", start + Duration::from_millis(100));
///
/// assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
/// assert_eq!(debouncer.poll(start + Duration::from_millis(600)), Some("fa"));
/// assert_eq!(debouncer.poll(start + Duration::from_millis(700)), None);
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiescence window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// The quiescence window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Records the latest input and restarts the window.
    pub fn push(&mut self, value: T, now: Instant) {
        let deadline = now.checked_add(self.window).unwrap_or(now);
        self.pending = Some(Pending { value, deadline });
    }

    /// When the pending value settles, if there is one.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Returns true while a value is waiting to settle.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Emits the pending value once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| deadline <= now) {
            self.pending.take().map(|pending| pending.value)
        } else {
            None
        }
    }

    /// Emits the pending value immediately, skipping the rest of the window.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}
