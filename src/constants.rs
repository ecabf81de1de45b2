//! Shared constants and default configuration values.

/// Upper bound for the simulated network delay in milliseconds.
///
/// The fetcher picks a uniform pseudo-random delay in `[0, max_delay)`,
/// so the default mimics an API that answers within three seconds.
pub const DEFAULT_MAX_DELAY_MS: u64 = 3000;

/// Largest accepted `max_delay_ms` value. Anything above this is almost
/// certainly a typo in the config file.
pub const MAX_DELAY_MS_LIMIT: u64 = 60_000;

/// Default debug trace setting.
pub const DEFAULT_DEBUG: bool = false;

/// Message shown when a fetch fails without carrying a usable message.
pub const ERROR_FALLBACK_MESSAGE: &str = "An error occurred";

/// Configuration file name, searched for under the XDG config directory.
pub const CONFIG_FILE: &str = "nowfetch.toml";
