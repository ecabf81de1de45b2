//! Mock current-date service.
//!
//! `DateFetcher` mimics contacting an API for the current date/time: it picks
//! a pseudo-random delay below a configured maximum, sleeps via the global
//! time source on a worker thread, then delivers the current timestamp
//! exactly once. Each invocation is independent; starting a second fetch
//! never cancels an earlier one.
//!
//! The result travels over a one-shot handle rather than a long-lived
//! subscribable channel, so a single request can never observe more than one
//! delivery.

use chrono::{DateTime, Local};
use rand::Rng;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::constants::DEFAULT_MAX_DELAY_MS;

/// Outcome of a single fetch: the current timestamp, or a failure.
pub type FetchOutcome = Result<DateTime<Local>, FetchError>;

/// Failure shape reaching the display unit.
///
/// The message is optional: a failing service may throw something with no
/// usable text at all. Normalization to a display string happens in the
/// display unit, not here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchError {
    message: Option<String>,
}

impl FetchError {
    /// Failure carrying a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Failure with no usable message.
    pub fn unspecified() -> Self {
        Self { message: None }
    }

    /// The carried message, if present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => f.write_str(message),
            None => f.write_str("unspecified fetch failure"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Non-blocking view of a pending fetch.
#[derive(Debug)]
pub enum FetchPoll {
    /// The fetch has not resolved yet.
    Pending,
    /// The fetch resolved with this outcome.
    Ready(FetchOutcome),
    /// The source went away without ever delivering; this fetch will never
    /// resolve.
    Abandoned,
}

/// Single-consumer handle to one in-flight fetch.
///
/// At most one outcome ever arrives; once it is taken the handle reports
/// `Abandoned` on later polls.
pub struct FetchHandle {
    rx: Receiver<FetchOutcome>,
}

impl FetchHandle {
    /// Create a resolver/handle pair. The resolver side delivers at most one
    /// outcome; dropping it unresolved abandons the fetch.
    pub fn channel() -> (Sender<FetchOutcome>, FetchHandle) {
        let (tx, rx) = mpsc::channel();
        (tx, FetchHandle { rx })
    }

    /// Handle that is already resolved with `outcome`.
    pub fn resolved(outcome: FetchOutcome) -> FetchHandle {
        let (tx, handle) = Self::channel();
        let _ = tx.send(outcome);
        handle
    }

    /// Handle that will never resolve.
    pub fn never() -> FetchHandle {
        Self::channel().1
    }

    /// Check for a result without blocking.
    pub fn poll(&self) -> FetchPoll {
        match self.rx.try_recv() {
            Ok(outcome) => FetchPoll::Ready(outcome),
            Err(TryRecvError::Empty) => FetchPoll::Pending,
            Err(TryRecvError::Disconnected) => FetchPoll::Abandoned,
        }
    }

    /// Block until the fetch resolves. Returns `None` if the source went
    /// away without delivering.
    pub fn recv(self) -> Option<FetchOutcome> {
        self.rx.recv().ok()
    }
}

/// Seam between the display unit and whatever produces timestamps.
///
/// Production code uses [`DateFetcher`]; tests substitute scripted sources.
pub trait DateSource {
    /// Start one fetch and return its handle.
    fn fetch(&self) -> FetchHandle;
}

/// Production date source with a randomized delivery delay.
pub struct DateFetcher {
    max_delay: Duration,
}

impl DateFetcher {
    /// Fetcher with the default 3-second delay ceiling.
    pub fn new() -> Self {
        Self::with_max_delay(Duration::from_millis(DEFAULT_MAX_DELAY_MS))
    }

    /// Fetcher whose delay is drawn uniformly from `[0, max_delay)`.
    /// A zero `max_delay` means immediate delivery.
    pub fn with_max_delay(max_delay: Duration) -> Self {
        Self { max_delay }
    }

    fn pick_delay(&self) -> Duration {
        let max_ms = self.max_delay.as_millis() as u64;
        if max_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
        }
    }
}

impl Default for DateFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DateSource for DateFetcher {
    fn fetch(&self) -> FetchHandle {
        let (tx, handle) = FetchHandle::channel();
        let delay = self.pick_delay();

        thread::spawn(move || {
            crate::time_source::sleep(delay);
            // The receiver may be gone if a newer request superseded this one
            let _ = tx.send(Ok(crate::time_source::now()));
        });

        handle
    }
}
