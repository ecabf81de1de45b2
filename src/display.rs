//! Three-state display unit driving the current-date presentation.
//!
//! `DateDisplay` orchestrates fetches against a [`DateSource`], holds the
//! loading / loaded / failed state, and renders successful results with the
//! configured format preset. Raw failures never reach the presentation
//! layer: they are normalized to a display string here.
//!
//! Overlapping requests are ordered by issuance, not completion: every
//! request carries a monotonically increasing token, and only the latest
//! issued request may change the state. Superseding a request also drops its
//! handle, so a stale resolution has no path back in.

use crate::constants::ERROR_FALLBACK_MESSAGE;
use crate::fetch::{DateSource, FetchHandle, FetchOutcome, FetchPoll};
use crate::format::{FormatPreset, format_timestamp};

/// What the presentation layer should currently show.
///
/// Exactly one variant is active at any time; transitioning to a variant
/// replaces whatever was shown before, so stale data or errors never linger
/// next to a fresh loading indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// A fetch is in flight (or nothing has been requested yet).
    Loading,
    /// The formatted date string to display.
    Loaded { text: String },
    /// A human-readable failure message.
    Failed { message: String },
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }

    /// The formatted date, when loaded.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            DisplayState::Loaded { text } => Some(text),
            _ => None,
        }
    }

    /// The failure message, when failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            DisplayState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

struct PendingRequest {
    token: u64,
    handle: FetchHandle,
}

/// Display unit orchestrating fetches and state transitions.
pub struct DateDisplay<S: DateSource> {
    source: S,
    format: FormatPreset,
    state: DisplayState,
    latest_token: u64,
    pending: Option<PendingRequest>,
}

impl<S: DateSource> DateDisplay<S> {
    /// Display unit with the default medium preset.
    pub fn new(source: S) -> Self {
        Self::with_format(source, FormatPreset::default())
    }

    pub fn with_format(source: S, format: FormatPreset) -> Self {
        Self {
            source,
            format,
            state: DisplayState::Loading,
            latest_token: 0,
            pending: None,
        }
    }

    /// Current display state.
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Currently configured format preset.
    pub fn format(&self) -> FormatPreset {
        self.format
    }

    /// Change the preset used for subsequent requests. Does not re-render an
    /// already loaded value.
    pub fn set_format(&mut self, format: FormatPreset) {
        self.format = format;
    }

    /// Request a fresh date with the given preset.
    ///
    /// Sets the state to `Loading` synchronously and starts a fetch. Any
    /// request still in flight is superseded: its eventual resolution will be
    /// discarded, whichever order the results arrive in.
    pub fn request_update(&mut self, format: FormatPreset) {
        self.format = format;
        self.refresh();
    }

    /// Re-fetch with the currently configured preset (the "update" button).
    pub fn refresh(&mut self) {
        self.state = DisplayState::Loading;
        self.latest_token += 1;
        // Replacing the pending request drops the superseded handle
        self.pending = Some(PendingRequest {
            token: self.latest_token,
            handle: self.source.fetch(),
        });
    }

    /// Apply the pending fetch's outcome if it has resolved. Non-blocking.
    pub fn poll(&mut self) -> &DisplayState {
        let polled = self
            .pending
            .as_ref()
            .map(|pending| (pending.token, pending.handle.poll()));

        if let Some((token, poll)) = polled {
            match poll {
                FetchPoll::Ready(outcome) => {
                    self.pending = None;
                    self.apply(token, outcome);
                }
                FetchPoll::Abandoned => {
                    // The source will never deliver; the state stays Loading
                    self.pending = None;
                }
                FetchPoll::Pending => {}
            }
        }

        &self.state
    }

    /// Block until the pending fetch resolves, then apply its outcome.
    ///
    /// If the source goes away without delivering, the state remains
    /// `Loading`; there is no timeout.
    pub fn wait(&mut self) -> &DisplayState {
        if let Some(pending) = self.pending.take()
            && let Some(outcome) = pending.handle.recv()
        {
            self.apply(pending.token, outcome);
        }
        &self.state
    }

    fn apply(&mut self, token: u64, outcome: FetchOutcome) {
        // Last-writer-wins by issuance order: results from superseded
        // requests are discarded even if they arrive after the newer one
        if token != self.latest_token {
            return;
        }

        match outcome {
            Ok(timestamp) => {
                log_debug!("Current date: {timestamp}");
                self.state = DisplayState::Loaded {
                    text: format_timestamp(&timestamp, self.format),
                };
            }
            Err(error) => {
                let message = match error.message() {
                    Some(text) => text.to_owned(),
                    None => ERROR_FALLBACK_MESSAGE.to_owned(),
                };
                self.state = DisplayState::Failed { message };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use chrono::{DateTime, Local, TimeZone};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc::Sender;

    fn fixture() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 19, 16, 15, 39).unwrap()
    }

    /// Source that resolves immediately with a fixed timestamp.
    struct InstantSource(DateTime<Local>);

    impl DateSource for InstantSource {
        fn fetch(&self) -> FetchHandle {
            FetchHandle::resolved(Ok(self.0))
        }
    }

    /// Source that resolves immediately with a fixed error.
    struct FailingSource(FetchError);

    impl DateSource for FailingSource {
        fn fetch(&self) -> FetchHandle {
            FetchHandle::resolved(Err(self.0.clone()))
        }
    }

    /// Source that never delivers anything.
    struct NeverSource;

    impl DateSource for NeverSource {
        fn fetch(&self) -> FetchHandle {
            FetchHandle::never()
        }
    }

    /// Source whose requests the test resolves by hand, in any order.
    #[derive(Clone, Default)]
    struct ManualSource {
        resolvers: Rc<RefCell<Vec<Sender<FetchOutcome>>>>,
    }

    impl ManualSource {
        fn resolve(&self, request: usize, outcome: FetchOutcome) {
            // Send may fail if the request was superseded; that is the point
            let _ = self.resolvers.borrow()[request].send(outcome);
        }
    }

    impl DateSource for ManualSource {
        fn fetch(&self) -> FetchHandle {
            let (tx, handle) = FetchHandle::channel();
            self.resolvers.borrow_mut().push(tx);
            handle
        }
    }

    #[test]
    fn test_request_sets_loading_synchronously() {
        let source = ManualSource::default();
        let mut display = DateDisplay::new(source.clone());

        display.request_update(FormatPreset::Medium);
        assert!(display.state().is_loading());
        assert_eq!(display.state().display_text(), None);
        assert_eq!(display.state().error_message(), None);
    }

    #[test]
    fn test_successful_fetch_loads_formatted_text() {
        let ts = fixture();
        let mut display = DateDisplay::new(InstantSource(ts));

        display.request_update(FormatPreset::Medium);
        let state = display.poll();

        let expected = format_timestamp(&ts, FormatPreset::Medium);
        assert!(!expected.is_empty());
        assert_eq!(state.display_text(), Some(expected.as_str()));
        assert!(!state.is_loading());
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_requested_preset_drives_formatting() {
        let ts = fixture();
        let mut display = DateDisplay::new(InstantSource(ts));

        display.request_update(FormatPreset::Short);
        let state = display.wait();

        let expected = format_timestamp(&ts, FormatPreset::Short);
        assert_eq!(state.display_text(), Some(expected.as_str()));
    }

    #[test]
    fn test_error_message_used_verbatim() {
        let mut display = DateDisplay::new(FailingSource(FetchError::new("It broke")));

        display.request_update(FormatPreset::Medium);
        let state = display.poll();

        assert_eq!(state.error_message(), Some("It broke"));
        assert!(!state.is_loading());
        assert_eq!(state.display_text(), None);
    }

    #[test]
    fn test_empty_error_message_falls_back() {
        let mut display = DateDisplay::new(FailingSource(FetchError::new("")));

        display.request_update(FormatPreset::Medium);
        assert_eq!(display.poll().error_message(), Some("An error occurred"));
    }

    #[test]
    fn test_unspecified_error_falls_back() {
        let mut display = DateDisplay::new(FailingSource(FetchError::unspecified()));

        display.request_update(FormatPreset::Medium);
        assert_eq!(display.poll().error_message(), Some("An error occurred"));
    }

    #[test]
    fn test_refresh_passes_through_loading_again() {
        let ts = fixture();
        let mut display = DateDisplay::new(InstantSource(ts));

        display.request_update(FormatPreset::Medium);
        assert!(display.wait().display_text().is_some());

        display.refresh();
        assert!(display.state().is_loading());
        assert!(display.wait().display_text().is_some());
    }

    #[test]
    fn test_never_resolving_source_stays_loading() {
        let mut display = DateDisplay::new(NeverSource);

        display.request_update(FormatPreset::Medium);
        assert!(display.poll().is_loading());
        assert!(display.wait().is_loading());
    }

    #[test]
    fn test_stale_resolution_is_discarded() {
        let source = ManualSource::default();
        let mut display = DateDisplay::new(source.clone());

        let old_ts = fixture();
        let new_ts = Local.with_ymd_and_hms(2025, 12, 25, 8, 30, 0).unwrap();

        display.request_update(FormatPreset::Medium);
        display.request_update(FormatPreset::Medium);

        // First request resolves after being superseded; it must not win
        source.resolve(0, Ok(old_ts));
        assert!(display.poll().is_loading());

        source.resolve(1, Ok(new_ts));
        let expected = format_timestamp(&new_ts, FormatPreset::Medium);
        assert_eq!(display.poll().display_text(), Some(expected.as_str()));
    }

    #[test]
    fn test_newer_request_replaces_failed_state() {
        let source = ManualSource::default();
        let mut display = DateDisplay::new(source.clone());

        display.request_update(FormatPreset::Medium);
        source.resolve(0, Err(FetchError::new("It broke")));
        assert_eq!(display.poll().error_message(), Some("It broke"));

        // The retry clears the error and goes through Loading again
        display.refresh();
        assert!(display.state().is_loading());
        assert_eq!(display.state().error_message(), None);

        source.resolve(1, Ok(fixture()));
        assert!(display.poll().display_text().is_some());
    }

    #[test]
    fn test_exactly_one_state_facet_active() {
        let ts = fixture();
        let mut display = DateDisplay::new(InstantSource(ts));

        // Loading: both facets empty
        display.request_update(FormatPreset::Full);
        let state = display.state();
        assert!(state.is_loading());
        assert!(state.display_text().is_none() && state.error_message().is_none());

        // Loaded: text only
        let state = display.wait();
        assert!(state.display_text().is_some() && state.error_message().is_none());
    }

    #[test]
    fn test_set_format_applies_on_next_refresh() {
        let ts = fixture();
        let mut display = DateDisplay::new(InstantSource(ts));
        assert_eq!(display.format(), FormatPreset::Medium);

        display.set_format(FormatPreset::Full);
        display.refresh();

        let expected = format_timestamp(&ts, FormatPreset::Full);
        assert_eq!(display.wait().display_text(), Some(expected.as_str()));
    }
}
