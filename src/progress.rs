// src/progress.rs
use crate::runner::Tally;
use crate::scrape::Disposition;

/// Progress reporting for a run. The CLI prints; tests and library callers can pass
/// `NullProgress` or nothing at all.
pub trait Progress {
    /// Called once with the number of catalog records.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called once per record, when its disposition is final.
    fn item_done(&mut self, _disposition: &Disposition) {}

    /// Called at the end with the final counts.
    fn finish(&mut self, _tally: &Tally) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
