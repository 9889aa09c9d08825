/// ProgressReporter port for user-facing progress during a batch
///
/// Diagnostics go through `tracing`; this port carries what an operator
/// watching the batch needs to see.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports position within the batch
    ///
    /// # Arguments
    /// * `current` - 1-based index of the release being processed
    /// * `total` - Number of releases in the batch
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of the batch
    fn report_completion(&self, message: &str);
}
