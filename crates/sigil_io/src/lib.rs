mod mmap_reader;
mod reader;

pub use mmap_reader::MmapSource;
pub use reader::FileSource;

use sigil_core::{DetectError, Result, Source};
use std::fs::{self, File};
use std::path::Path;

/// Opens `path` as a boxed [`Source`], memory-mapped where possible.
pub fn open_source(path: impl AsRef<Path>) -> Result<Box<dyn Source>> {
    let path_ref = path.as_ref();

    match MmapSource::new(path_ref) {
        Ok(r) => Ok(Box::new(r)),
        Err(e @ DetectError::InvalidSourceType(_)) => Err(e),
        Err(e) => {
            tracing::debug!(path = %path_ref.display(), error = %e, "mmap unavailable, using file reader");
            Ok(Box::new(FileSource::open(path_ref)?))
        }
    }
}

/// Rejects anything at `path` that is neither a regular file nor a block
/// device. Checked before opening, since opening a FIFO blocks until a
/// writer shows up.
pub(crate) fn ensure_path_seekable(path: &Path) -> Result<()> {
    check_file_type(fs::metadata(path)?.file_type(), path)
}

pub(crate) fn ensure_seekable(file: &File, path: &Path) -> Result<()> {
    check_file_type(file.metadata()?.file_type(), path)
}

fn check_file_type(file_type: fs::FileType, path: &Path) -> Result<()> {
    #[cfg(unix)]
    let is_device = {
        use std::os::unix::fs::FileTypeExt;
        file_type.is_block_device()
    };
    #[cfg(not(unix))]
    let is_device = false;

    if file_type.is_file() || is_device {
        Ok(())
    } else {
        Err(DetectError::InvalidSourceType(format!(
            "{} is not a regular file",
            path.display()
        )))
    }
}
