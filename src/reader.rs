//! Encoding-aware logical-line readers.
//!
//! One reader family exists per GEDCOM encoding. All of them share the same
//! contract: consume the byte stream after the BOM, normalize line
//! terminators (`\r`, `\n`, `\r\n` and `\n\r` each count as one), discard
//! blank lines, intern lines that match the common vocabulary, emit a
//! progress event every `read_notification_rate` lines plus a final
//! completion event, and observe the cancellation flag on every iteration.
//!
//! Decoding problems never abort the read: offending bytes become U+FFFD
//! and a warning is recorded.

pub(crate) mod ansel;

use std::borrow::Cow;

use encoding_rs::{UTF_16BE, UTF_16LE};

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::encoding::{DetectedEncoding, Encoding};
use crate::options::ParseOptions;
use crate::progress::{CancelFlag, FileObserver, ProgressEvent};
use crate::util;
use crate::GedcomError;

/// A decoded logical line: terminator stripped, never blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SourceLine {
    /// The line text. Common lines borrow from the process-wide interner.
    pub text: Cow<'static, str>,
    /// 1-based physical line number (blank lines still advance it).
    pub number: u32,
}

/// Which terminator sequence ended a physical line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Terminator {
    Lf,
    CrLf,
    Cr,
    LfCr,
}

/// Reads logical lines out of a byte buffer in the detected encoding.
pub(crate) struct LineReader<'a> {
    options: &'a ParseOptions,
    cancel: &'a CancelFlag,
    observers: &'a mut [FileObserver],
    sink: &'a mut DiagnosticSink,
    lines: Vec<SourceLine>,
    /// Set once a bare-CR or LF-CR terminator has been reported.
    odd_terminator_reported: bool,
}

impl<'a> LineReader<'a> {
    pub(crate) fn new(
        options: &'a ParseOptions,
        cancel: &'a CancelFlag,
        observers: &'a mut [FileObserver],
        sink: &'a mut DiagnosticSink,
    ) -> Self {
        LineReader {
            options,
            cancel,
            observers,
            sink,
            lines: Vec::new(),
            odd_terminator_reported: false,
        }
    }

    /// Consumes the buffer and returns its logical lines.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::Cancelled`] if the cancellation flag is seen.
    pub(crate) fn read(
        mut self,
        bytes: &[u8],
        detected: DetectedEncoding,
    ) -> Result<Vec<SourceLine>, GedcomError> {
        let body = &bytes[detected.bom_len.min(bytes.len())..];
        match detected.encoding {
            Encoding::Ascii | Encoding::Ansel | Encoding::Utf8 => {
                self.read_single_byte(body, detected.encoding)?;
            }
            Encoding::Utf16Le | Encoding::Utf16Be => {
                self.read_utf16(body, detected.encoding)?;
            }
        }
        self.notify(ProgressEvent {
            lines_read: self.lines.len(),
            complete: true,
        });
        Ok(self.lines)
    }

    /// Reader for the single-byte family (ASCII, ANSEL, UTF-8), where the
    /// terminator bytes are unambiguous octets.
    fn read_single_byte(&mut self, body: &[u8], encoding: Encoding) -> Result<(), GedcomError> {
        let mut start = 0usize;
        let mut number: u32 = 1;
        let mut i = 0usize;
        while i < body.len() {
            let b = body[i];
            if b != b'\r' && b != b'\n' {
                i += 1;
                continue;
            }
            let (terminator, len) = classify_terminator(b, body.get(i + 1).copied());
            self.note_terminator(terminator, number);
            let text = self.decode_single_byte(&body[start..i], encoding, number);
            self.push_line(text, number)?;
            i += len;
            start = i;
            number += 1;
        }
        let text = self.decode_single_byte(&body[start..], encoding, number);
        self.push_line(text, number)?;
        Ok(())
    }

    fn decode_single_byte(&mut self, raw: &[u8], encoding: Encoding, number: u32) -> String {
        match encoding {
            Encoding::Ascii => {
                if raw.is_ascii() {
                    // Bytes below 0x80 are valid UTF-8 by construction.
                    String::from_utf8_lossy(raw).into_owned()
                } else {
                    self.warn_replaced(number);
                    raw.iter()
                        .map(|&b| if b < 0x80 { b as char } else { ansel::REPLACEMENT })
                        .collect()
                }
            }
            Encoding::Utf8 => match String::from_utf8_lossy(raw) {
                Cow::Borrowed(s) => s.to_string(),
                Cow::Owned(s) => {
                    self.warn_replaced(number);
                    s
                }
            },
            Encoding::Ansel => {
                let (text, replaced) = ansel::decode_line(raw);
                if replaced > 0 {
                    self.warn_replaced(number);
                }
                text
            }
            Encoding::Utf16Le | Encoding::Utf16Be => unreachable!("handled by read_utf16"),
        }
    }

    /// Reader for the UTF-16 family. Operates on two-byte units; the
    /// terminator characters are the same CR/LF code points in either byte
    /// order.
    fn read_utf16(&mut self, body: &[u8], encoding: Encoding) -> Result<(), GedcomError> {
        let little_endian = encoding == Encoding::Utf16Le;
        let even = body.len() - body.len() % 2;
        if even != body.len() {
            self.sink.warning(Diagnostic::new(
                "odd trailing byte in UTF-16 stream ignored",
            ));
        }
        let body = &body[..even];
        let unit_at = |index: usize| -> u16 {
            let pair = [body[index * 2], body[index * 2 + 1]];
            if little_endian {
                u16::from_le_bytes(pair)
            } else {
                u16::from_be_bytes(pair)
            }
        };
        let units = body.len() / 2;

        let mut start = 0usize;
        let mut number: u32 = 1;
        let mut i = 0usize;
        while i < units {
            let unit = unit_at(i);
            if unit != 0x000D && unit != 0x000A {
                i += 1;
                continue;
            }
            let first = if unit == 0x000D { b'\r' } else { b'\n' };
            let next = if i + 1 < units {
                match unit_at(i + 1) {
                    0x000D => Some(b'\r'),
                    0x000A => Some(b'\n'),
                    _ => None,
                }
            } else {
                None
            };
            let (terminator, len) = classify_terminator(first, next);
            self.note_terminator(terminator, number);
            let text = self.decode_utf16(&body[start * 2..i * 2], little_endian, number);
            self.push_line(text, number)?;
            i += len;
            start = i;
            number += 1;
        }
        let text = self.decode_utf16(&body[start * 2..], little_endian, number);
        self.push_line(text, number)?;
        Ok(())
    }

    fn decode_utf16(&mut self, raw: &[u8], little_endian: bool, number: u32) -> String {
        let codec = if little_endian { UTF_16LE } else { UTF_16BE };
        let (text, had_errors) = codec.decode_without_bom_handling(raw);
        if had_errors {
            self.warn_replaced(number);
        }
        text.into_owned()
    }

    /// Accounts for one decoded physical line: blank lines are dropped,
    /// everything else is interned when common, counted, and reported.
    fn push_line(&mut self, text: String, number: u32) -> Result<(), GedcomError> {
        if self.cancel.is_cancelled() {
            return Err(GedcomError::Cancelled {
                lines_read: self.lines.len(),
            });
        }
        if text.chars().all(char::is_whitespace) {
            return Ok(());
        }
        self.lines.push(SourceLine {
            text: util::intern_or_own(text),
            number,
        });
        let count = self.lines.len();
        if self.options.read_notification_rate > 0 && count % self.options.read_notification_rate == 0
        {
            self.notify(ProgressEvent {
                lines_read: count,
                complete: false,
            });
        }
        Ok(())
    }

    fn note_terminator(&mut self, terminator: Terminator, number: u32) {
        if !self.options.strict_line_breaks || self.odd_terminator_reported {
            return;
        }
        if matches!(terminator, Terminator::Cr | Terminator::LfCr) {
            self.odd_terminator_reported = true;
            self.sink.warning(
                Diagnostic::new(match terminator {
                    Terminator::Cr => "line terminated by bare CR",
                    _ => "line terminated by LF-CR",
                })
                .at_line(number),
            );
        }
    }

    fn warn_replaced(&mut self, number: u32) {
        self.sink.warning(
            Diagnostic::new("invalid byte sequence replaced with U+FFFD").at_line(number),
        );
    }

    fn notify(&mut self, event: ProgressEvent) {
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

/// Works out which terminator begins at a CR or LF byte, and how many
/// characters it spans. `\r\n` and `\n\r` collapse to one terminator.
fn classify_terminator(first: u8, next: Option<u8>) -> (Terminator, usize) {
    match (first, next) {
        (b'\r', Some(b'\n')) => (Terminator::CrLf, 2),
        (b'\n', Some(b'\r')) => (Terminator::LfCr, 2),
        (b'\r', _) => (Terminator::Cr, 1),
        _ => (Terminator::Lf, 1),
    }
}
