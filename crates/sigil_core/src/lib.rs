pub mod cursor;
pub mod detector;
pub mod dimensions;
mod error;
pub mod signatures;
mod traits;
mod types;

pub use cursor::read_at;
pub use detector::{Detector, DetectorConfig, PrefixPolicy, determine_mime_type};
pub use dimensions::determine_dimensions;
pub use error::{DetectError, Result};
pub use traits::{Source, StreamSource};
pub use types::{Dimensions, MimeType};
