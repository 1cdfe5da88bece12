use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Postscript,
    Flac,
    Gif,
    Jpeg,
    Png,
    Xml,
    WebP,
    OctetStream,
    PlainText,
}

impl MimeType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postscript => "application/postscript",
            Self::Flac => "audio/flac",
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpg",
            Self::Png => "image/png",
            Self::Xml => "text/xml",
            Self::WebP => "image/webp",
            Self::OctetStream => "application/octet-stream",
            Self::PlainText => "text/plain; charset=utf-8",
        }
    }

    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Gif | Self::Jpeg | Self::Png | Self::WebP)
    }
}

impl Serialize for MimeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl From<imagesize::ImageSize> for Dimensions {
    fn from(size: imagesize::ImageSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

impl From<Dimensions> for (usize, usize) {
    fn from(dims: Dimensions) -> Self {
        (dims.width, dims.height)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
