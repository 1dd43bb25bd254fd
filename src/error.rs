use std::fmt;

use crate::diagnostics::Diagnostic;

/// Fatal conditions that abort a parse.
///
/// Anything recoverable is recorded as a [`Diagnostic`] instead; a
/// `GedcomError` means no usable object graph could be produced.
#[derive(Debug)]
pub enum GedcomError {
    /// An I/O error while reading the byte source.
    Io(std::io::Error),
    /// The file declared a character set this reader does not know.
    UnsupportedEncoding(String),
    /// A line could not be tokenized (missing or out-of-range level,
    /// missing tag).
    InvalidLine {
        /// The 1-based line number of the offending line.
        line: u32,
        /// What went wrong.
        message: String,
    },
    /// The file does not begin with `0 HEAD`.
    MissingHeader,
    /// The file does not end with `0 TRLR`.
    MissingTrailer,
    /// The cancellation flag was observed set.
    Cancelled {
        /// How many logical lines had been read when the flag was seen.
        lines_read: usize,
    },
}

impl fmt::Display for GedcomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GedcomError::Io(err) => write!(f, "IO error: {err}"),
            GedcomError::UnsupportedEncoding(name) => {
                write!(f, "Unsupported character set: {name}")
            }
            GedcomError::InvalidLine { line, message } => {
                write!(f, "Invalid line {line}: {message}")
            }
            GedcomError::MissingHeader => write!(f, "Invalid GEDCOM format: missing HEAD"),
            GedcomError::MissingTrailer => write!(f, "Invalid GEDCOM format: missing TRLR"),
            GedcomError::Cancelled { lines_read } => {
                write!(f, "Parse cancelled after {lines_read} lines")
            }
        }
    }
}

impl std::error::Error for GedcomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GedcomError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GedcomError {
    fn from(err: std::io::Error) -> Self {
        GedcomError::Io(err)
    }
}

/// A failed load: the fatal reason plus everything recorded before it.
///
/// The partially-built graph is discarded; the diagnostic lists are kept so
/// callers can report what was seen up to the point of failure.
#[derive(Debug)]
pub struct LoadError {
    /// The condition that aborted the parse.
    pub error: GedcomError,
    /// Recoverable errors recorded before the abort.
    pub errors: Vec<Diagnostic>,
    /// Warnings recorded before the abort.
    pub warnings: Vec<Diagnostic>,
}

impl LoadError {
    /// True if the load was aborted by the cancellation flag.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.error, GedcomError::Cancelled { .. })
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if !self.errors.is_empty() || !self.warnings.is_empty() {
            write!(
                f,
                " ({} errors, {} warnings recorded)",
                self.errors.len(),
                self.warnings.len()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
