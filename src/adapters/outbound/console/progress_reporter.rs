use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;

/// StderrProgressReporter adapter for reporting progress to stderr.
///
/// Writes progress information to stderr so it doesn't interfere with the
/// JSON output on stdout. Uses indicatif for the batch progress bar and
/// owo-colors for warnings.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
        }
    }

    fn batch_bar(&self, total: usize) -> ProgressBar {
        self.progress_bar
            .borrow_mut()
            .get_or_insert_with(|| {
                let style = ProgressStyle::with_template(
                    "  {bar:32.green} {pos}/{len} assets ({elapsed}) {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
                ProgressBar::new(total as u64).with_style(style)
            })
            .clone()
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.batch_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        if let Some(pb) = self.progress_bar.borrow().as_ref() {
            pb.finish_and_clear();
        }
        eprintln!("{}", message.yellow());
    }

    fn report_completion(&self, message: &str) {
        if let Some(pb) = self.progress_bar.borrow().as_ref() {
            pb.finish_and_clear();
        }
        eprintln!();
        eprintln!("{}", message.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_does_not_panic() {
        let reporter = StderrProgressReporter::new();
        reporter.report("processing");
        reporter.report_progress(5, 10, Some("asset 5"));
        reporter.report_error("asset 6 not found");
        reporter.report_completion("done");
    }
}
