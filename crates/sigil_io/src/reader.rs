//! File-backed source for regular files and block devices.

use sigil_core::{Result, Source};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// A read-only [`Source`] over an open file that remembers its path.
///
/// Because the path is known, dimension probing goes straight to the file on
/// disk and never moves this source's cursor.
///
/// # Example
///
/// ```ignore
/// use sigil_io::FileSource;
/// use sigil_core::determine_mime_type;
///
/// let mut source = FileSource::open("photo.jpg")?;
/// let mime = determine_mime_type(&mut source)?;
/// ```
#[derive(Debug)]
pub struct FileSource {
    file: File,
    path: PathBuf,
}

impl FileSource {
    /// Opens `path` read-only.
    ///
    /// # Returns
    ///
    /// An error if the file cannot be opened, or
    /// [`sigil_core::DetectError::InvalidSourceType`] if it is a directory,
    /// FIFO, socket or anything else that cannot be read by offset.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        crate::ensure_path_seekable(path)?;
        let file = OpenOptions::new().read(true).write(false).open(path)?;

        #[cfg(target_os = "linux")]
        {
            use rustix::fs::{Advice, fadvise};

            let _ = fadvise(&file, 0, None, Advice::Random);
        }

        Self::from_file(file, path)
    }

    /// Wraps a file the caller already opened, keeping its current cursor.
    pub fn from_file(file: File, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        crate::ensure_seekable(&file, &path)?;
        Ok(Self { file, path })
    }
}

impl Source for FileSource {
    fn position(&mut self) -> io::Result<u64> {
        self.file.stream_position()
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        self.file.read(buffer)
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_core::{DetectError, MimeType, determine_mime_type};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_basic() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"Hello, World!").unwrap();
        temp_file.flush().unwrap();

        let mut source = FileSource::open(temp_file.path()).unwrap();
        assert_eq!(source.path(), Some(temp_file.path()));

        source.seek_to(7).unwrap();
        let mut buffer = vec![0u8; 5];
        assert_eq!(source.read(&mut buffer).unwrap(), 5);
        assert_eq!(&buffer, b"World");
    }

    #[test]
    fn test_from_file_keeps_cursor() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"GIF87a\x02\x00\x02\x00").unwrap();
        temp_file.flush().unwrap();

        let mut file = File::open(temp_file.path()).unwrap();
        file.seek(SeekFrom::Start(4)).unwrap();

        let mut source = FileSource::from_file(file, temp_file.path()).unwrap();
        assert_eq!(source.position().unwrap(), 4);
        assert_eq!(determine_mime_type(&mut source).unwrap(), MimeType::Gif);
        assert_eq!(source.position().unwrap(), 4);
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::open(dir.path()).unwrap_err();
        assert!(matches!(err, DetectError::InvalidSourceType(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::open(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, DetectError::Io(_)));
    }
}
