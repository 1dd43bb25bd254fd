//! Character-set detection for GEDCOM byte streams.
//!
//! GEDCOM 5.5/5.5.1 permits five encodings. The set in use is discovered
//! from the raw bytes, in priority order:
//!
//! 1. A byte-order mark (UTF-8 or UTF-16, either endianness). A BOM always
//!    wins; a contradicting `CHAR` declaration draws a warning.
//! 2. A UTF-16 byte pattern on the first character: every GEDCOM file
//!    starts with `0`, so `0x30 0x00` means UTF-16LE and `0x00 0x30`
//!    UTF-16BE even without a BOM.
//! 3. The mandatory `1 CHAR <value>` line in the header, matched
//!    case-insensitively.
//! 4. Failing all of the above, ANSEL is assumed (the 5.5.1 default for
//!    undeclared files) and a warning is recorded.

use std::fmt;

use unicase::UniCase;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::GedcomError;

/// How far into the file the `1 CHAR` declaration is searched for.
const DECLARATION_SCAN_LIMIT: usize = 2048;

/// The character encodings permitted by GEDCOM 5.5/5.5.1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// 7-bit ASCII. Bytes above 0x7F are invalid.
    Ascii,
    /// ANSEL (ANSI/NISO Z39.47), an 8-bit set with prefix combining marks.
    Ansel,
    /// UTF-8, with or without BOM.
    Utf8,
    /// UTF-16 little-endian (`CHAR UNICODE` or BOM/pattern detected).
    Utf16Le,
    /// UTF-16 big-endian (BOM or pattern detected).
    Utf16Be,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::Ascii => "ASCII",
            Encoding::Ansel => "ANSEL",
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
        };
        write!(f, "{name}")
    }
}

/// The outcome of detection: which encoding, and how many leading BOM bytes
/// the reader must skip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DetectedEncoding {
    pub encoding: Encoding,
    pub bom_len: usize,
}

/// Detects the encoding of a GEDCOM byte stream.
///
/// # Errors
///
/// Returns [`GedcomError::UnsupportedEncoding`] when the header declares a
/// character set outside the GEDCOM five.
pub(crate) fn detect(
    bytes: &[u8],
    sink: &mut DiagnosticSink,
) -> Result<DetectedEncoding, GedcomError> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        warn_on_conflict(&bytes[3..], Encoding::Utf8, false, sink);
        return Ok(DetectedEncoding {
            encoding: Encoding::Utf8,
            bom_len: 3,
        });
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        warn_on_conflict(&bytes[2..], Encoding::Utf16Le, true, sink);
        return Ok(DetectedEncoding {
            encoding: Encoding::Utf16Le,
            bom_len: 2,
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        warn_on_conflict(&bytes[2..], Encoding::Utf16Be, true, sink);
        return Ok(DetectedEncoding {
            encoding: Encoding::Utf16Be,
            bom_len: 2,
        });
    }

    // A file body always starts with the '0' of "0 HEAD"; a zero byte on
    // either side of it betrays BOM-less UTF-16.
    if bytes.len() >= 2 {
        if bytes[0] == 0x30 && bytes[1] == 0x00 {
            return Ok(DetectedEncoding {
                encoding: Encoding::Utf16Le,
                bom_len: 0,
            });
        }
        if bytes[0] == 0x00 && bytes[1] == 0x30 {
            return Ok(DetectedEncoding {
                encoding: Encoding::Utf16Be,
                bom_len: 0,
            });
        }
    }

    match declared_charset(bytes, false) {
        Some(name) => {
            let encoding = charset_by_name(&name)
                .ok_or_else(|| GedcomError::UnsupportedEncoding(name.clone()))?;
            Ok(DetectedEncoding {
                encoding,
                bom_len: 0,
            })
        }
        None => {
            sink.warning(Diagnostic::new(
                "no character set declared; assuming ANSEL",
            ));
            Ok(DetectedEncoding {
                encoding: Encoding::Ansel,
                bom_len: 0,
            })
        }
    }
}

/// Maps a declared `CHAR` value onto an encoding. `UNICODE` without a BOM
/// reads as UTF-16 little-endian.
fn charset_by_name(name: &str) -> Option<Encoding> {
    let name = UniCase::new(name);
    if name == UniCase::new("ASCII") {
        Some(Encoding::Ascii)
    } else if name == UniCase::new("ANSEL") {
        Some(Encoding::Ansel)
    } else if name == UniCase::new("UTF-8") || name == UniCase::new("UTF8") {
        Some(Encoding::Utf8)
    } else if name == UniCase::new("UNICODE") {
        Some(Encoding::Utf16Le)
    } else {
        None
    }
}

/// Records a warning when the header's `CHAR` value contradicts what the
/// BOM established. The BOM wins.
fn warn_on_conflict(
    body: &[u8],
    from_bom: Encoding,
    utf16: bool,
    sink: &mut DiagnosticSink,
) {
    if let Some(name) = declared_charset(body, utf16) {
        let agrees = match charset_by_name(&name) {
            Some(declared) => {
                declared == from_bom
                    // UNICODE agrees with either UTF-16 byte order.
                    || (declared == Encoding::Utf16Le && from_bom == Encoding::Utf16Be)
            }
            None => false,
        };
        if !agrees {
            sink.warning(
                Diagnostic::new(format!(
                    "character set declared as {name} but byte-order mark indicates {from_bom}; using {from_bom}"
                ))
                .with_tag("CHAR"),
            );
        }
    }
}

/// Scans the head of the buffer for `1 CHAR <value>` and returns the value.
///
/// For UTF-16 content the scan runs over the buffer with zero bytes
/// removed: ASCII characters carry one zero octet in either byte order, so
/// the declaration survives the squeeze regardless of endianness.
fn declared_charset(bytes: &[u8], utf16: bool) -> Option<String> {
    let head = &bytes[..bytes.len().min(DECLARATION_SCAN_LIMIT)];
    let squeezed: Vec<u8>;
    let head = if utf16 {
        squeezed = head.iter().copied().filter(|&b| b != 0x00).collect();
        &squeezed[..]
    } else {
        head
    };

    for raw_line in head.split(|&b| b == b'\n' || b == b'\r') {
        let mut words = raw_line
            .split(|&b| b == b' ' || b == b'\t')
            .filter(|w| !w.is_empty());
        if words.next() != Some(&b"1"[..]) || words.next() != Some(&b"CHAR"[..]) {
            continue;
        }
        let value = words.next()?;
        return Some(String::from_utf8_lossy(value).into_owned());
    }
    None
}
