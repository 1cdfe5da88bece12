//! Cursor-safe reads: fetch bytes at an absolute offset and put the cursor
//! back where the caller left it.

use crate::{DetectError, Result, Source};
use std::io;

/// Reads up to `length` bytes starting at `offset`, restoring the cursor.
///
/// Short reads at end-of-source return fewer bytes. A failing seek to
/// `offset` is tolerated when the cursor was already there, since some
/// sources report seek errors without moving.
///
/// # Errors
///
/// * [`DetectError::ReadFailure`] if the position query or the read fails,
///   or the seek fails while the cursor sits elsewhere.
/// * [`DetectError::CursorRestoreFailure`] if the original position cannot be
///   restored and verified. The source is in an unknown state afterwards.
pub fn read_at<S: Source + ?Sized>(source: &mut S, offset: u64, length: usize) -> Result<Vec<u8>> {
    let read_failure = |source: io::Error| DetectError::ReadFailure {
        offset,
        length,
        source,
    };

    let original = source.position().map_err(read_failure)?;

    let seek_result = source.seek_to(offset);
    let read_result = match seek_result {
        Err(e) if original != offset => Err(e),
        _ => read_fully(source, length),
    };

    let data = match read_result {
        Ok(data) => data,
        Err(e) => {
            restore(source, original)?;
            return Err(read_failure(e));
        }
    };

    restore(source, original)?;
    Ok(data)
}

fn read_fully<S: Source + ?Sized>(source: &mut S, length: usize) -> io::Result<Vec<u8>> {
    let mut buffer = vec![0u8; length];
    let mut filled = 0;

    while filled < length {
        match source.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    buffer.truncate(filled);
    Ok(buffer)
}

fn restore<S: Source + ?Sized>(source: &mut S, position: u64) -> Result<()> {
    let restore_failure = |source: io::Error| DetectError::CursorRestoreFailure { position, source };

    source.seek_to(position).map_err(restore_failure)?;

    let actual = source.position().map_err(restore_failure)?;
    if actual != position {
        return Err(restore_failure(io::Error::other(format!(
            "cursor reported at {actual} after restore"
        ))));
    }

    Ok(())
}

/// Reads from the current position until end-of-source.
///
/// A failing read is reported as [`DetectError::ReadFailure`] at the number
/// of bytes already collected, which is the absolute offset when the source
/// was rewound first.
pub(crate) fn read_to_end<S: Source + ?Sized>(source: &mut S) -> Result<Vec<u8>> {
    const CHUNK_SIZE: usize = 8192;

    let mut data = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        match source.read(&mut chunk) {
            Ok(0) => return Ok(data),
            Ok(n) => data.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(DetectError::ReadFailure {
                    offset: data.len() as u64,
                    length: CHUNK_SIZE,
                    source: e,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StreamSource;

    /// Source wrapper that injects failures into selected operations.
    struct FaultySource {
        inner: StreamSource<io::Cursor<Vec<u8>>>,
        refused_seeks: Vec<u64>,
        fail_read: bool,
        fail_after: Option<u64>,
        trickle: bool,
        seeks: usize,
    }

    impl FaultySource {
        fn new(data: &[u8]) -> Self {
            Self {
                inner: StreamSource::from_bytes(data.to_vec()),
                refused_seeks: Vec::new(),
                fail_read: false,
                fail_after: None,
                trickle: false,
                seeks: 0,
            }
        }
    }

    impl Source for FaultySource {
        fn position(&mut self) -> io::Result<u64> {
            self.inner.position()
        }

        fn seek_to(&mut self, offset: u64) -> io::Result<()> {
            self.seeks += 1;
            if let Some(idx) = self.refused_seeks.iter().position(|&o| o == offset) {
                self.refused_seeks.remove(idx);
                return Err(io::Error::other("seek refused"));
            }
            self.inner.seek_to(offset)
        }

        fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
            if self.fail_read {
                return Err(io::Error::other("read refused"));
            }
            if let Some(limit) = self.fail_after {
                let position = self.inner.position()?;
                if position >= limit {
                    return Err(io::Error::other("read refused"));
                }
                let allowed = buffer.len().min((limit - position) as usize);
                return self.inner.read(&mut buffer[..allowed]);
            }
            if self.trickle && buffer.len() > 1 {
                return self.inner.read(&mut buffer[..1]);
            }
            self.inner.read(buffer)
        }
    }

    #[test]
    fn test_read_at_restores_position() {
        let mut source = StreamSource::from_bytes(b"0123456789abcdef".to_vec());
        source.seek_to(5).unwrap();

        let data = read_at(&mut source, 8, 4).unwrap();
        assert_eq!(data, b"89ab");
        assert_eq!(source.position().unwrap(), 5);
    }

    #[test]
    fn test_read_at_short_read_at_end() {
        let mut source = StreamSource::from_bytes(b"abc".to_vec());
        assert_eq!(read_at(&mut source, 0, 8).unwrap(), b"abc");
        assert!(read_at(&mut source, 8, 8).unwrap().is_empty());
        assert_eq!(source.position().unwrap(), 0);
    }

    #[test]
    fn test_read_at_collects_trickled_reads() {
        let mut source = FaultySource::new(b"0123456789");
        source.trickle = true;
        assert_eq!(read_at(&mut source, 2, 4).unwrap(), b"2345");
    }

    #[test]
    fn test_read_failure_restores_cursor() {
        let mut source = FaultySource::new(b"0123456789");
        source.inner.seek_to(3).unwrap();
        source.fail_read = true;

        let err = read_at(&mut source, 0, 8).unwrap_err();
        assert!(matches!(err, DetectError::ReadFailure { offset: 0, length: 8, .. }));
        assert_eq!(source.position().unwrap(), 3);
    }

    #[test]
    fn test_seek_error_without_movement_is_tolerated() {
        let mut source = FaultySource::new(b"0123456789");
        source.refused_seeks = vec![0];

        assert_eq!(read_at(&mut source, 0, 4).unwrap(), b"0123");
        assert_eq!(source.position().unwrap(), 0);
    }

    #[test]
    fn test_seek_error_with_movement_is_read_failure() {
        let mut source = FaultySource::new(b"0123456789");
        source.refused_seeks = vec![8];

        let err = read_at(&mut source, 8, 4).unwrap_err();
        assert!(matches!(err, DetectError::ReadFailure { offset: 8, .. }));
        assert_eq!(source.position().unwrap(), 0);
    }

    #[test]
    fn test_restore_failure_is_reported() {
        let mut source = FaultySource::new(b"0123456789");
        source.inner.seek_to(2).unwrap();
        source.refused_seeks = vec![2];

        let err = read_at(&mut source, 0, 4).unwrap_err();
        assert!(matches!(err, DetectError::CursorRestoreFailure { position: 2, .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_read_to_end_collects_everything() {
        let data: Vec<u8> = (0..20_000u32).map(|i| i as u8).collect();
        let mut source = FaultySource::new(&data);
        assert_eq!(read_to_end(&mut source).unwrap(), data);
        assert_eq!(source.seeks, 0);
    }

    #[test]
    fn test_read_to_end_reports_offset_reached() {
        let data = vec![0x42u8; 10_000];
        let mut source = FaultySource::new(&data);
        source.fail_after = Some(9000);

        let err = read_to_end(&mut source).unwrap_err();
        assert!(matches!(err, DetectError::ReadFailure { offset: 9000, length: 8192, .. }));
        assert!(err.to_string().starts_with("Failed to read 8192 bytes at offset 9000"));
    }
}
