/// ProgressReporter port for reporting progress during batch operations.
///
/// This port abstracts progress reporting (e.g., to stderr) so the
/// application layer stays free of terminal concerns.
pub trait ProgressReporter {
    /// Reports an informational message.
    fn report(&self, message: &str);

    /// Reports batch progress.
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning or error message without aborting the batch.
    fn report_error(&self, message: &str);

    /// Reports completion of an operation.
    fn report_completion(&self, message: &str);
}
