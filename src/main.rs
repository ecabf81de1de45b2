//! Terminal demo for the current-date display unit.
//!
//! Loads the configuration, fetches the current date once, and then
//! re-fetches on every Enter press until EOF. This is the whole
//! "presentation layer": it only reads the three-state display and prints
//! whichever facet is active.

use anyhow::Result;
use std::io::BufRead;

use nowfetch::logger::Log;
use nowfetch::{
    DateDisplay, DateFetcher, DateSource, config, log_block_start, log_decorated, log_end,
    log_error, log_indented, log_pipe, log_version, log_warning,
};

fn main() {
    if let Err(e) = run() {
        log_pipe!();
        log_error!("{e:#}");
        log_end!();
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    log_version!();

    let config = config::load()?;
    Log::set_debug(config.debug());

    log_block_start!("Loaded configuration");
    log_indented!("max_delay_ms = {}", config.max_delay().as_millis());
    log_indented!("format = {}", config.format());

    let fetcher = DateFetcher::with_max_delay(config.max_delay());
    let mut display = DateDisplay::with_format(fetcher, config.format());

    show_current_date(&mut display);

    log_block_start!("Press Enter to refresh (Ctrl-D to quit)");
    for line in std::io::stdin().lock().lines() {
        line?;
        show_current_date(&mut display);
    }

    log_end!();
    Ok(())
}

fn show_current_date<S: DateSource>(display: &mut DateDisplay<S>) {
    display.refresh();
    log_block_start!("Fetching current date...");

    let state = display.wait();
    if let Some(text) = state.display_text() {
        log_decorated!("Current date: {text}");
    } else if let Some(message) = state.error_message() {
        log_warning!("{message}");
    } else {
        log_warning!("Date service went away without answering");
    }
}
