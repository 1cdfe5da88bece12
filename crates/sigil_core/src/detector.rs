use crate::cursor::read_at;
use crate::dimensions;
use crate::signatures::{PREFIX_LEN, SIGNATURES, WEBP_OFFSET, WEBP_SIGNATURE, looks_binary};
use crate::{DetectError, Dimensions, MimeType, Result, Source};

/// How to treat a signature longer than the bytes the source could supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixPolicy {
    /// Missing bytes make the signature a non-match.
    #[default]
    Lenient,
    /// Missing bytes fail detection with [`DetectError::UnreadableStream`].
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DetectorConfig {
    pub prefix_policy: PrefixPolicy,
}

/// Signature-based MIME type and image dimension detector.
///
/// A detector holds only configuration, so one value can serve any number of
/// sources, including from several threads at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Guesses the MIME type of `source` from its leading bytes.
    ///
    /// The cursor is left where the caller had it, unless restoring it fails,
    /// in which case [`DetectError::CursorRestoreFailure`] is returned.
    pub fn determine_mime_type<S: Source + ?Sized>(&self, source: &mut S) -> Result<MimeType> {
        let initial = read_at(source, 0, PREFIX_LEN)?;

        for (mime, variants) in SIGNATURES {
            for signature in *variants {
                if self.matches(&initial, 0, signature)? {
                    tracing::trace!(%mime, "signature matched at offset 0");
                    return Ok(*mime);
                }
            }
        }

        let next = read_at(source, WEBP_OFFSET, PREFIX_LEN)?;
        if self.matches(&next, WEBP_OFFSET, WEBP_SIGNATURE)? {
            tracing::trace!("WEBP form type matched at offset {}", WEBP_OFFSET);
            return Ok(MimeType::WebP);
        }

        if looks_binary(&initial) {
            Ok(MimeType::OctetStream)
        } else {
            Ok(MimeType::PlainText)
        }
    }

    /// Reads the pixel size of an image source.
    ///
    /// See [`dimensions::determine_dimensions`] for cursor behaviour.
    pub fn determine_dimensions<S: Source + ?Sized>(&self, source: &mut S) -> Result<Dimensions> {
        dimensions::determine_dimensions(source)
    }

    /// `data` was read from `base`; a strict failure reports the absolute
    /// offset of the first missing byte.
    fn matches(&self, data: &[u8], base: u64, signature: &[u8]) -> Result<bool> {
        if data.len() >= signature.len() {
            return Ok(data.starts_with(signature));
        }

        match self.config.prefix_policy {
            PrefixPolicy::Lenient => Ok(false),
            PrefixPolicy::Strict => Err(DetectError::UnreadableStream {
                offset: base + data.len() as u64,
            }),
        }
    }
}

/// Detects the MIME type of `source` with the default configuration.
pub fn determine_mime_type<S: Source + ?Sized>(source: &mut S) -> Result<MimeType> {
    Detector::new().determine_mime_type(source)
}
