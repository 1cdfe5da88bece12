use memmap2::Mmap;
use sigil_core::{DetectError, Result, Source};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Memory-mapped [`Source`] with its own cursor.
pub struct MmapSource {
    mmap: Mmap,
    path: PathBuf,
    cursor: u64,
}

impl MmapSource {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        crate::ensure_path_seekable(path)?;
        let file = File::open(path)?;
        crate::ensure_seekable(&file, path)?;

        if file.metadata()?.len() == 0 {
            return Err(DetectError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Cannot mmap empty file",
            )));
        }

        let mmap = unsafe { Mmap::map(&file) }?;

        if mmap.is_empty() {
            return Err(DetectError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "mmap returned empty mapping (block device not supported)",
            )));
        }

        #[cfg(unix)]
        {
            use memmap2::Advice;
            let _ = mmap.advise(Advice::Random);
        }

        Ok(Self {
            mmap,
            path: path.to_path_buf(),
            cursor: 0,
        })
    }

    #[inline]
    fn len(&self) -> u64 {
        self.mmap.len() as u64
    }
}

impl Source for MmapSource {
    fn position(&mut self) -> io::Result<u64> {
        Ok(self.cursor)
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.cursor = offset;
        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        if self.cursor >= self.len() {
            return Ok(0);
        }
        let start = self.cursor as usize;
        let end = start.saturating_add(buffer.len()).min(self.mmap.len());
        let len = end - start;
        buffer[..len].copy_from_slice(&self.mmap[start..end]);
        self.cursor += len as u64;
        Ok(len)
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
