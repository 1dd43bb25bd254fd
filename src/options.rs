//! Parser configuration and the fluent builder.

use std::io::Read;
use std::path::Path;

use crate::progress::{CancelFlag, FileObserver, ProgressEvent, RecordEvent, RecordObserver};
use crate::source::{BufferSource, ByteSource, FileSource, ReaderSource};
use crate::{LoadError, ParseOutcome};

/// Plain-data options controlling how a file is parsed. All defaults are
/// safe; most callers never touch this directly and go through
/// [`GedcomBuilder`] instead.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Logical lines between read-progress events. Default 500; zero
    /// disables intermediate events (the completion event still fires).
    pub read_notification_rate: usize,
    /// When true, terminators other than `\n` and `\r\n` draw a warning.
    pub strict_line_breaks: bool,
    /// When true, `_`-prefixed user-defined tags draw a warning instead of
    /// being accepted silently.
    pub strict_custom_tags: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            read_notification_rate: 500,
            strict_line_breaks: false,
            strict_custom_tags: false,
        }
    }
}

/// A builder for configuring and running a GEDCOM parse.
///
/// # Example
///
/// ```rust
/// use ged_parse::GedcomBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = b"0 HEAD\n1 GEDC\n2 VERS 5.5.1\n1 CHAR ASCII\n0 TRLR\n";
/// let outcome = GedcomBuilder::new()
///     .strict_line_breaks(true)
///     .build_from_bytes(source)?;
///
/// assert!(outcome.errors.is_empty());
/// println!("parsed {} individuals", outcome.gedcom.individuals.len());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct GedcomBuilder {
    options: ParseOptions,
    cancel: CancelFlag,
    file_observers: Vec<FileObserver>,
    record_observers: Vec<RecordObserver>,
}

impl GedcomBuilder {
    /// Creates a builder with default options.
    #[must_use]
    pub fn new() -> Self {
        GedcomBuilder::default()
    }

    /// Sets how many logical lines pass between read-progress events.
    #[must_use]
    pub fn read_notification_rate(mut self, rate: usize) -> Self {
        self.options.read_notification_rate = rate;
        self
    }

    /// Warns on line terminators other than `\n` and `\r\n`.
    #[must_use]
    pub fn strict_line_breaks(mut self, enabled: bool) -> Self {
        self.options.strict_line_breaks = enabled;
        self
    }

    /// Warns on `_`-prefixed user-defined tags.
    #[must_use]
    pub fn strict_custom_tags(mut self, enabled: bool) -> Self {
        self.options.strict_custom_tags = enabled;
        self
    }

    /// Installs an externally settable cancellation flag. The readers
    /// observe it at least once per logical line.
    #[must_use]
    pub fn cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = flag;
        self
    }

    /// Registers a callback for read-progress events. May be called
    /// multiple times; observers run in registration order, synchronously
    /// on the parsing thread, and must not panic.
    #[must_use]
    pub fn file_observer(mut self, observer: impl FnMut(&ProgressEvent) + 'static) -> Self {
        self.file_observers.push(Box::new(observer));
        self
    }

    /// Registers a callback invoked after each level-0 record hydrates.
    #[must_use]
    pub fn record_observer(mut self, observer: impl FnMut(&RecordEvent) + 'static) -> Self {
        self.record_observers.push(Box::new(observer));
        self
    }

    /// The current options.
    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] on any fatal condition, carrying the
    /// diagnostics accumulated before it.
    pub fn build_from_bytes(self, bytes: &[u8]) -> Result<ParseOutcome, LoadError> {
        self.build_from_source(Box::new(BufferSource::from(bytes)))
    }

    /// Opens and parses a file.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`]; I/O failures surface as
    /// [`crate::GedcomError::Io`].
    pub fn build_from_path(self, path: impl AsRef<Path>) -> Result<ParseOutcome, LoadError> {
        self.build_from_source(Box::new(FileSource::new(path)))
    }

    /// Drains and parses an arbitrary reader.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`]; I/O failures surface as
    /// [`crate::GedcomError::Io`].
    pub fn build_from_reader(self, reader: impl Read + 'static) -> Result<ParseOutcome, LoadError> {
        self.build_from_source(Box::new(ReaderSource::new(reader)))
    }

    /// Parses any [`ByteSource`]. The source is consumed and closed on all
    /// exit paths.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] on any fatal condition.
    pub fn build_from_source(self, source: Box<dyn ByteSource>) -> Result<ParseOutcome, LoadError> {
        crate::load(
            source,
            self.options,
            self.cancel,
            self.file_observers,
            self.record_observers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let builder = GedcomBuilder::new();
        assert_eq!(builder.options().read_notification_rate, 500);
        assert!(!builder.options().strict_line_breaks);
        assert!(!builder.options().strict_custom_tags);
    }

    #[test]
    fn test_fluent_options() {
        let builder = GedcomBuilder::new()
            .read_notification_rate(100)
            .strict_line_breaks(true)
            .strict_custom_tags(true);
        assert_eq!(builder.options().read_notification_rate, 100);
        assert!(builder.options().strict_line_breaks);
        assert!(builder.options().strict_custom_tags);
    }

    #[test]
    fn test_build_minimal() {
        let outcome = GedcomBuilder::new()
            .build_from_bytes(b"0 HEAD\n1 GEDC\n2 VERS 5.5.1\n1 CHAR ASCII\n0 TRLR\n")
            .unwrap();
        assert!(outcome.errors.is_empty());
        assert!(outcome.gedcom.trailer.is_some());
    }
}
