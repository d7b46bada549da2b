use log::{info, warn};

mod accordion;
mod boot;
mod browser;
mod config;
mod dom;
mod error;
mod header;
mod nav;
mod schedule;
mod scroll_focus;

#[cfg(test)]
mod testing;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site behaviors");
    let started = boot::when_ready(|| {
        if let Err(skip) = boot::run() {
            warn!("Site behaviors not started: {}", skip);
        }
    });
    if let Err(skip) = started {
        warn!("Could not wait for the document: {}", skip);
    }
}
