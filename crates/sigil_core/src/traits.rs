//! Core trait defining the interface for seekable byte sources.
//!
//! Detection logic only ever talks to a [`Source`], so the same detector
//! works on files, memory maps, in-memory buffers or any other `Read + Seek`
//! stream through a thin adapter.

use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// A readable, seekable byte source owned by the caller.
///
/// Detection borrows the source mutably for the duration of a single call and
/// never closes it. Implementations report failures through `io::Result` and
/// leave the decision of how to surface them to the detector.
///
/// # Example
///
/// ```ignore
/// struct Tape { /* ... */ }
///
/// impl Source for Tape {
///     fn position(&mut self) -> io::Result<u64> { /* ... */ }
///     fn seek_to(&mut self, offset: u64) -> io::Result<()> { /* ... */ }
///     fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> { /* ... */ }
/// }
/// ```
pub trait Source {
    /// Returns the current cursor position, in bytes from the start.
    fn position(&mut self) -> io::Result<u64>;

    /// Moves the cursor to an absolute offset from the start.
    fn seek_to(&mut self, offset: u64) -> io::Result<()>;

    /// Reads into `buffer` from the current position.
    ///
    /// # Returns
    ///
    /// The number of bytes read. Zero means end-of-source; a short count is
    /// not an error.
    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize>;

    /// Returns the real filesystem path backing this source, if any.
    fn path(&self) -> Option<&Path> {
        None
    }

    /// Moves the cursor back to the start of the source.
    fn rewind(&mut self) -> io::Result<()> {
        self.seek_to(0)
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn position(&mut self) -> io::Result<u64> {
        (**self).position()
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        (**self).seek_to(offset)
    }

    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        (**self).read(buffer)
    }

    fn path(&self) -> Option<&Path> {
        (**self).path()
    }

    fn rewind(&mut self) -> io::Result<()> {
        (**self).rewind()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn position(&mut self) -> io::Result<u64> {
        (**self).position()
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        (**self).seek_to(offset)
    }

    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        (**self).read(buffer)
    }

    fn path(&self) -> Option<&Path> {
        (**self).path()
    }

    fn rewind(&mut self) -> io::Result<()> {
        (**self).rewind()
    }
}

/// Adapter exposing any `Read + Seek` stream as a [`Source`] with no path.
///
/// Sources built this way always take the buffered route when reading image
/// dimensions.
#[derive(Debug)]
pub struct StreamSource<R> {
    inner: R,
}

impl<R: Read + Seek> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl StreamSource<io::Cursor<Vec<u8>>> {
    /// Wraps an owned buffer, positioned at its start.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::new(io::Cursor::new(data.into()))
    }
}

impl<R: Read + Seek> Source for StreamSource<R> {
    fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buffer)
    }
}
