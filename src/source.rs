//! Byte sources feeding the parser.
//!
//! A [`ByteSource`] is consumed exactly once per load. It yields the raw
//! bytes of a GEDCOM file and reports the total size when it is knowable up
//! front (used only as a capacity hint; progress is measured in lines).

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::GedcomError;

/// A one-shot source of raw GEDCOM bytes.
pub trait ByteSource {
    /// The total number of bytes this source will yield, if known.
    fn total_size(&self) -> Option<u64>;

    /// Consumes the source, returning all of its bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GedcomError::Io`] if the underlying stream fails.
    fn read_all(self: Box<Self>) -> Result<Vec<u8>, GedcomError>;
}

/// A byte source backed by an in-memory buffer.
pub struct BufferSource(Vec<u8>);

impl BufferSource {
    /// Wraps an owned buffer.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        BufferSource(bytes)
    }
}

impl From<&[u8]> for BufferSource {
    fn from(bytes: &[u8]) -> Self {
        BufferSource(bytes.to_vec())
    }
}

impl ByteSource for BufferSource {
    fn total_size(&self) -> Option<u64> {
        Some(self.0.len() as u64)
    }

    fn read_all(self: Box<Self>) -> Result<Vec<u8>, GedcomError> {
        Ok(self.0)
    }
}

/// A byte source backed by a file on disk. The file is opened lazily when
/// the load begins, so a bad path surfaces as [`GedcomError::Io`] from the
/// parse rather than from construction.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for the given path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ByteSource for FileSource {
    fn total_size(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    fn read_all(self: Box<Self>) -> Result<Vec<u8>, GedcomError> {
        let mut file = File::open(&self.path)?;
        let mut bytes = match self.total_size() {
            Some(size) => Vec::with_capacity(usize::try_from(size).unwrap_or(0)),
            None => Vec::new(),
        };
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// A byte source wrapping an arbitrary reader of unknown length.
pub struct ReaderSource<R: Read>(R);

impl<R: Read> ReaderSource<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        ReaderSource(reader)
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn total_size(&self) -> Option<u64> {
        None
    }

    fn read_all(self: Box<Self>) -> Result<Vec<u8>, GedcomError> {
        let mut bytes = Vec::new();
        let mut reader = self.0;
        reader.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_source() {
        let source = Box::new(BufferSource::new(b"0 HEAD\n0 TRLR\n".to_vec()));
        assert_eq!(source.total_size(), Some(14));
        assert_eq!(source.read_all().unwrap(), b"0 HEAD\n0 TRLR\n");
    }

    #[test]
    fn test_reader_source_has_no_size() {
        let source = Box::new(ReaderSource::new(&b"0 HEAD"[..]));
        assert_eq!(source.total_size(), None);
        assert_eq!(source.read_all().unwrap(), b"0 HEAD");
    }

    #[test]
    fn test_file_source_missing_path_is_io_error() {
        let source = Box::new(FileSource::new("/no/such/file.ged"));
        match source.read_all() {
            Err(GedcomError::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
