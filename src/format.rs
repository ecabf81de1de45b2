//! Date/time format presets and the formatting rule for each.
//!
//! Formatting is a pure function of the timestamp and the preset: the same
//! input always renders the same string. Month, weekday, and zone names come
//! from chrono and render in English; the clock is 24-hour.

use chrono::{DateTime, TimeZone};
use serde::Deserialize;
use std::fmt;

/// Display granularity for the fetched date/time.
///
/// Each preset maps to a fixed strftime pattern, from a compact numeric
/// rendering (`Short`) up to full weekday and time zone names (`Full`).
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatPreset {
    /// Numeric day/month/two-digit year, hour and minute: `3/19/25, 16:15`
    Short,
    /// Abbreviated month with seconds: `Mar 19, 2025, 16:15:39`
    #[default]
    Medium,
    /// Full month with seconds and zone: `March 19, 2025, 16:15:39 UTC`
    Long,
    /// Weekday and full month with seconds and zone:
    /// `Wednesday, March 19, 2025, 16:15:39 UTC`
    Full,
}

impl FormatPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatPreset::Short => "short",
            FormatPreset::Medium => "medium",
            FormatPreset::Long => "long",
            FormatPreset::Full => "full",
        }
    }

    /// The strftime pattern backing this preset.
    fn pattern(&self) -> &'static str {
        match self {
            FormatPreset::Short => "%-m/%-d/%y, %H:%M",
            FormatPreset::Medium => "%b %-d, %Y, %H:%M:%S",
            FormatPreset::Long => "%B %-d, %Y, %H:%M:%S %Z",
            FormatPreset::Full => "%A, %B %-d, %Y, %H:%M:%S %Z",
        }
    }
}

impl fmt::Display for FormatPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `timestamp` according to `preset`.
pub fn format_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>, preset: FormatPreset) -> String
where
    Tz::Offset: fmt::Display,
{
    timestamp.format(preset.pattern()).to_string()
}
