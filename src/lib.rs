/*!
`ged_parse` is a Rust crate for reading GEDCOM 5.5/5.5.1 files.

The library works with GEDCOM (GEnealogical Data COMmunication), a
line-oriented text format widely supported by genealogy software.
`ged_parse` detects the file's character encoding (ASCII, ANSEL, UTF-8, or
UTF-16 in either byte order), tokenizes and nests the lines, and interprets
them into a typed object graph with every cross-reference checked. Problems
in real-world files are recorded as structured diagnostics instead of
aborting the parse wherever recovery is possible.

Basic example:

```rust
use ged_parse::GedcomBuilder;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let source = std::fs::read("./tests/fixtures/simple.ged")?;
let outcome = GedcomBuilder::new().build_from_bytes(&source)?;

// Display file statistics and any recorded problems
outcome.gedcom.stats();
for warning in &outcome.warnings {
    eprintln!("warning: {warning}");
}
# Ok(())
# }
```

Progress and cancellation:

```rust
use ged_parse::{CancelFlag, GedcomBuilder};

let cancel = CancelFlag::new();
let builder = GedcomBuilder::new()
    .read_notification_rate(1000)
    .cancel_flag(cancel.clone())
    .file_observer(|event| {
        if event.complete {
            println!("done: {} lines", event.lines_read);
        }
    });
// cancel.cancel() from any thread makes the parse fail with a
// cancellation error.
```

This crate contains an optional `"json"` feature that implements
serialization of the object model with [`serde`](https://serde.rs).
*/

#![deny(clippy::pedantic)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod diagnostics;
mod encoding;
mod error;
mod line;
mod options;
mod parser;
mod progress;
mod reader;
pub mod source;
mod tree;
mod util;

pub mod types;

pub use diagnostics::Diagnostic;
pub use encoding::Encoding;
pub use error::{GedcomError, LoadError};
pub use options::{GedcomBuilder, ParseOptions};
pub use progress::{CancelFlag, ProgressEvent, RecordEvent};
pub use types::Gedcom;

use diagnostics::DiagnosticSink;
use progress::{FileObserver, RecordObserver};
use source::ByteSource;

/// A successful parse: the object graph plus everything recorded along the
/// way.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The populated object graph. Owned solely by the caller.
    pub gedcom: Gedcom,
    /// Recoverable errors the parser worked around, in observation order.
    pub errors: Vec<Diagnostic>,
    /// Warnings, in observation order.
    pub warnings: Vec<Diagnostic>,
}

/// Parses an in-memory buffer with default options.
///
/// Equivalent to `GedcomBuilder::new().build_from_bytes(bytes)`.
///
/// # Errors
///
/// Returns a [`LoadError`] on any fatal condition.
pub fn parse(bytes: &[u8]) -> Result<ParseOutcome, LoadError> {
    GedcomBuilder::new().build_from_bytes(bytes)
}

/// The parse pipeline: detect encoding, read lines, tokenize, build the
/// tag tree, interpret the object graph. Fatal conditions abort with the
/// diagnostics accumulated so far; the partial graph is discarded.
pub(crate) fn load(
    source: Box<dyn ByteSource>,
    options: ParseOptions,
    cancel: CancelFlag,
    mut file_observers: Vec<FileObserver>,
    mut record_observers: Vec<RecordObserver>,
) -> Result<ParseOutcome, LoadError> {
    let mut sink = DiagnosticSink::new();
    let result = run_pipeline(
        source,
        &options,
        &cancel,
        &mut file_observers,
        &mut record_observers,
        &mut sink,
    );
    let (errors, warnings) = sink.into_lists();
    match result {
        Ok(gedcom) => Ok(ParseOutcome {
            gedcom,
            errors,
            warnings,
        }),
        Err(error) => Err(LoadError {
            error,
            errors,
            warnings,
        }),
    }
}

fn run_pipeline(
    source: Box<dyn ByteSource>,
    options: &ParseOptions,
    cancel: &CancelFlag,
    file_observers: &mut [FileObserver],
    record_observers: &mut [RecordObserver],
    sink: &mut DiagnosticSink,
) -> Result<Gedcom, GedcomError> {
    let bytes = source.read_all()?;
    let detected = encoding::detect(&bytes, sink)?;

    let source_lines =
        reader::LineReader::new(options, cancel, file_observers, sink).read(&bytes, detected)?;
    drop(bytes);

    let mut parsed = Vec::with_capacity(source_lines.len());
    for source_line in &source_lines {
        parsed.push(line::tokenize(source_line, options, sink)?);
    }
    drop(source_lines);

    let roots = tree::build(parsed, sink)?;
    Ok(parser::interpret(&roots, sink, record_observers))
}
