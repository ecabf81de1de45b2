//! End-to-end fetch tests against a simulated fast-forward clock.
//!
//! The fetcher keeps its full randomized delay ceiling here; the simulated
//! time source turns the sleeps into instant virtual-clock jumps, so these
//! tests never wait on real elapsed time.

use chrono::{DateTime, Local, TimeZone};
use std::sync::Arc;

use nowfetch::time_source::{self, SimulatedTimeSource};
use nowfetch::{DateDisplay, DateFetcher, DateSource, FormatPreset};

fn init_simulated_clock() -> DateTime<Local> {
    let start = Local.with_ymd_and_hms(2025, 3, 19, 16, 15, 39).unwrap();
    time_source::init_time_source(Arc::new(SimulatedTimeSource::new(start)));
    start
}

#[test]
fn fetch_resolves_under_simulated_clock() {
    let start = init_simulated_clock();
    let fetcher = DateFetcher::new(); // default 3-second delay ceiling

    let outcome = fetcher.fetch().recv().expect("fetch delivers one outcome");
    let fetched = outcome.expect("the mock fetch never fails");

    // The virtual clock only moves forward, so the fetched timestamp can
    // never precede the simulation start
    assert!(fetched >= start);
}

#[test]
fn display_reaches_loaded_state_end_to_end() {
    init_simulated_clock();
    let mut display = DateDisplay::with_format(DateFetcher::new(), FormatPreset::Full);

    display.refresh();
    assert!(display.state().is_loading());

    let state = display.wait();
    let text = state.display_text().expect("loaded after the fetch resolves");
    assert!(!text.is_empty());
    assert!(state.error_message().is_none());
}

#[test]
fn superseded_fetch_never_wins_end_to_end() {
    init_simulated_clock();
    let mut display = DateDisplay::with_format(DateFetcher::new(), FormatPreset::Medium);

    // Issue two overlapping requests; only the second may produce the result
    display.refresh();
    display.refresh();

    let state = display.wait();
    assert!(state.display_text().is_some());

    // Nothing left in flight: polling again keeps the final state
    let text = state.display_text().unwrap().to_owned();
    assert_eq!(display.poll().display_text(), Some(text.as_str()));
}
