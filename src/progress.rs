// src/progress.rs
/// Lightweight progress reporting used by long-running batches.
/// Front ends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of pages.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page mapped.
    fn item_done(&mut self, _name: &str) {}

    /// One page skipped, with a short reason.
    fn item_failed(&mut self, _name: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
