//! # Nowfetch Library
//!
//! Mock current-date service with a three-state display unit.
//!
//! The crate models the logic behind a "current date/time" widget:
//!
//! - **Fetch**: `fetch` module with [`DateFetcher`], which mimics an API call
//!   by delivering the current timestamp once after a randomized delay, and
//!   the [`DateSource`] seam tests substitute scripted sources through
//! - **State**: `display` module with the loading / loaded / failed
//!   [`DisplayState`] machine and last-writer-wins request ordering
//! - **Formatting**: `format` module with the four fixed presets
//! - **Time**: `time_source` module abstracting the clock and the delay
//!   timer, so tests run against a simulated fast-forward clock
//! - **Infrastructure**: TOML configuration and structured logging

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod config;
pub mod constants;
pub mod display;
pub mod fetch;
pub mod format;
pub mod time_source;

// Re-export the core API
pub use display::{DateDisplay, DisplayState};
pub use fetch::{DateFetcher, DateSource, FetchError, FetchHandle, FetchOutcome, FetchPoll};
pub use format::{FormatPreset, format_timestamp};
