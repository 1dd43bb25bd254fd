//! Structured diagnostics collected while parsing.
//!
//! Two ordered lists are kept for every parse: `errors` for recoverable
//! problems the parser worked around (dangling cross-references, level
//! skips, duplicate xrefs) and `warnings` for oddities that did not affect
//! the shape of the result (unknown tags, replaced byte sequences,
//! cardinality violations). Neither interrupts the parse; fatal conditions
//! are represented by [`crate::GedcomError`] instead.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// A single recorded problem, with as much positional context as was known
/// at the point it was observed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Human-readable description of the problem.
    pub message: String,
    /// 1-based physical line number in the source file, when known.
    pub line: Option<u32>,
    /// The GEDCOM tag involved, when one was in scope.
    pub tag: Option<String>,
    /// The cross-reference identifier involved, when one was in scope.
    pub xref: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Attaches a source line number.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Attaches the tag in scope.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Attaches the cross-reference in scope.
    #[must_use]
    pub fn with_xref(mut self, xref: impl Into<String>) -> Self {
        self.xref = Some(xref.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        write!(f, "{}", self.message)?;
        if let Some(ref tag) = self.tag {
            write!(f, " (tag {tag})")?;
        }
        if let Some(ref xref) = self.xref {
            write!(f, " ({xref})")?;
        }
        Ok(())
    }
}

/// Accumulates diagnostics for one parse invocation, in observation order.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticSink {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub(crate) fn new() -> Self {
        DiagnosticSink::default()
    }

    pub(crate) fn error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    pub(crate) fn warning(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    /// Consumes the sink, returning `(errors, warnings)`.
    pub(crate) fn into_lists(self) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
        (self.errors, self.warnings)
    }
}
