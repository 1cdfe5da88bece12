use serde::Serialize;
use sigil_core::{Dimensions, MimeType};
use std::fmt;

/// Outcome of inspecting one input.
#[derive(Debug, Serialize)]
pub struct Report {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<MimeType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    pub fn detected(input: String, mime: MimeType, dimensions: Option<Dimensions>) -> Self {
        Self {
            input,
            mime: Some(mime),
            dimensions,
            error: None,
        }
    }

    pub fn failed(input: String, error: &anyhow::Error) -> Self {
        Self {
            input,
            mime: None,
            dimensions: None,
            error: Some(format!("{error:#}")),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.input)?;

        if let Some(error) = &self.error {
            return write!(f, "error: {error}");
        }

        if let Some(mime) = self.mime {
            write!(f, "{mime}")?;
        }
        if let Some(dims) = self.dimensions {
            write!(f, " ({dims})")?;
        }
        Ok(())
    }
}
