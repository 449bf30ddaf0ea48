//! Run metrics.
//!
//! Counters are collected on every run; they are cheap integer bumps on the
//! streaming path. The binary prints them with `--stats` and the library logs
//! a one-line tally at `info` level when a run finishes.

use std::time::Duration;

/// Counters for one normalization run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Raw input lines consumed.
    pub lines_read: usize,
    /// Lines carrying neither an `id` nor a `pubdate` key.
    pub lines_ignored: usize,
    /// Complete `(id, pubdate)` records framed.
    pub records_read: usize,
    /// Records written to the output.
    pub records_emitted: usize,
    /// Records outside the PMID window.
    pub records_skipped: usize,
    /// Records emitted with their raw pubdate because no year was found.
    pub years_passed_through: usize,
    /// Wall-clock time for the run; zero until the run completes.
    pub elapsed: Duration,
}
