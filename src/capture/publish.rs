use std::io::Write;

use crate::capture::{
    clipboard::Selection,
    dependencies::PipelineDependencies,
    types::PublishReport,
};
use crate::config::Config;

/// Share the uploaded URL: clipboard, browser (if enabled) and stdout.
///
/// Every step is best-effort; failures are logged and never abort the run.
pub fn publish<W: Write>(
    config: &Config,
    url: &str,
    dependencies: &PipelineDependencies,
    out: &mut W,
) -> PublishReport {
    let mut report = PublishReport::default();

    for selection in Selection::ALL {
        match dependencies.clipboard.copy(selection, url) {
            Ok(()) => report.selections_copied += 1,
            Err(e) => log::debug!("Skipping {:?} selection: {}", selection, e),
        }
    }

    if config.open_in_browser() {
        match dependencies.browser.open(url) {
            Ok(()) => report.opened_in_browser = true,
            Err(e) => log::warn!("{}", e),
        }
    }

    match writeln!(out, "{}", url).and_then(|()| out.flush()) {
        Ok(()) => report.printed = true,
        Err(e) => log::debug!("Could not write URL to stdout: {}", e),
    }

    report
}
