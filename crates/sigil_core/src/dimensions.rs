use crate::cursor::read_to_end;
use crate::{DetectError, Dimensions, Result, Source};

/// Reads the pixel size of an image source.
///
/// Path-backed sources are measured through their path and the cursor is not
/// touched. Other sources are rewound and read to the end, so the cursor is
/// left at end-of-source.
///
/// # Errors
///
/// * [`DetectError::RewindFailure`] if a pathless source cannot be rewound.
/// * [`DetectError::ReadFailure`] if buffering the source fails.
/// * [`DetectError::InvalidImage`] if no image structure is recognized.
pub fn determine_dimensions<S: Source + ?Sized>(source: &mut S) -> Result<Dimensions> {
    if let Some(path) = source.path() {
        tracing::debug!(path = %path.display(), "reading image dimensions by path");
        return imagesize::size(path)
            .map(Dimensions::from)
            .map_err(|e| DetectError::InvalidImage {
                path: Some(path.to_path_buf()),
                reason: e.to_string(),
            });
    }

    source.rewind().map_err(DetectError::RewindFailure)?;

    let data = read_to_end(source)?;
    tracing::debug!(bytes = data.len(), "reading image dimensions from buffer");

    imagesize::blob_size(&data)
        .map(Dimensions::from)
        .map_err(|e| DetectError::InvalidImage {
            path: None,
            reason: e.to_string(),
        })
}
