//! Time source abstraction for supporting both real-time and simulated time.
//!
//! The fetcher's randomized delay and the "current date" it returns both go
//! through this module, so tests can swap in a simulated clock and never wait
//! on real elapsed time.

use chrono::{DateTime, Duration as ChronoDuration, Local};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration;

/// Global time source instance, defaults to RealTimeSource
static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Trait for abstracting time operations
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Local>;

    /// Sleep for the specified duration (or simulate it)
    fn sleep(&self, duration: Duration);

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;
}

/// Real-time implementation that uses actual system time
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Simulated time source with a virtual clock.
///
/// `sleep` advances the virtual clock by exactly the requested duration and
/// returns immediately (fast-forward), so a fetch configured with a
/// three-second delay resolves without any real waiting. `now` returns the
/// virtual clock's current reading.
pub struct SimulatedTimeSource {
    current: std::sync::Mutex<DateTime<Local>>,
}

impl SimulatedTimeSource {
    /// Create a simulated source whose virtual clock starts at `start_time`.
    pub fn new(start_time: DateTime<Local>) -> Self {
        Self {
            current: std::sync::Mutex::new(start_time),
        }
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        {
            let mut guard = self.current.lock().unwrap();
            *guard += ChronoDuration::milliseconds(duration.as_millis() as i64);
        }
        // Minimal real sleep to allow other threads to run
        std::thread::sleep(Duration::from_millis(1));
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Initialize the global time source (call once at startup)
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Local> {
    TIME_SOURCE.get_or_init(|| Arc::new(RealTimeSource)).now()
}

/// Sleep for the specified duration using the global time source
pub fn sleep(duration: Duration) {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .sleep(duration)
}

/// Check if we're running with a simulated clock
pub fn is_simulated() -> bool {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .is_simulated()
}
