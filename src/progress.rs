//! Progress notification and cooperative cancellation.
//!
//! Both readers and the record interpreter emit events synchronously on the
//! parsing thread. Observers are plain closures registered through
//! [`crate::GedcomBuilder`]; they must not panic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Emitted by the line readers while the file is consumed.
///
/// One event fires every `read_notification_rate` logical lines (default
/// 500) with `complete` false, and a final event fires at end of file with
/// `complete` true.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Logical (non-blank) lines read so far.
    pub lines_read: usize,
    /// True only for the final event of a read.
    pub complete: bool,
}

/// Emitted after each level-0 record has been hydrated into the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordEvent {
    /// The record's tag (`INDI`, `FAM`, `SOUR`, ...).
    pub tag: String,
    /// The record's cross-reference identifier, if it had one.
    pub xref: Option<String>,
    /// Count of level-0 records processed so far, this one included.
    pub records_processed: usize,
}

/// A cancellation flag shared between the parsing thread and any number of
/// controlling threads.
///
/// Cloning is cheap; all clones observe the same flag. The readers check
/// the flag at least once per logical line and abort with
/// [`crate::GedcomError::Cancelled`] when it is set.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a new, unset flag.
    #[must_use]
    pub fn new() -> Self {
        CancelFlag::default()
    }

    /// Requests cancellation. Safe to call from any thread.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once [`cancel`](CancelFlag::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Callback invoked with read-progress events.
pub type FileObserver = Box<dyn FnMut(&ProgressEvent)>;

/// Callback invoked after each hydrated level-0 record.
pub type RecordObserver = Box<dyn FnMut(&RecordEvent)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flag_shared() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        assert!(!clone.is_cancelled());
        flag.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_cancel_flag_across_threads() {
        let flag = CancelFlag::new();
        let clone = flag.clone();
        std::thread::spawn(move || clone.cancel()).join().unwrap();
        assert!(flag.is_cancelled());
    }
}
