//! Spinner utilities using indicatif for terminal output.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner:.green} {msg}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a spinner for indeterminate operations.
///
/// # Example
/// ```
/// use sitepulse::cli::output::progress::create_spinner;
///
/// let spinner = create_spinner();
/// spinner.set_message("Fetching...");
/// // do work
/// spinner.finish_with_message("Done");
/// ```
pub fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .expect("Invalid spinner template")
            .tick_chars(SPINNER_CHARS),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Create a spinner that draws nothing, for JSON mode and tests.
pub fn create_hidden_spinner() -> ProgressBar {
    ProgressBar::hidden()
}
