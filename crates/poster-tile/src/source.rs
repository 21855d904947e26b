//! Input adapters
//!
//! A poster can start from a file on disk or from bytes that arrived some
//! other way (an upload, stdin). Both decode to the same `DynamicImage`.

use crate::types::Result;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Something that can produce the decoded source image.
pub trait ImageSource {
    /// Human-readable name, used for logs and as the stem of exported tiles
    fn label(&self) -> &str;

    /// Decode the image. CPU-bound; call from a blocking context.
    fn decode(&self) -> Result<DynamicImage>;
}

/// Image stored on disk; the format is taken from the file extension.
#[derive(Debug, Clone)]
pub struct ImageFile {
    path: PathBuf,
    label: String,
}

impl ImageFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_owned();
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Self { path, label }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for ImageFile {
    fn label(&self) -> &str {
        &self.label
    }

    fn decode(&self) -> Result<DynamicImage> {
        Ok(image::open(&self.path)?)
    }
}

/// Encoded image held in memory; the format is sniffed from the content.
#[derive(Debug, Clone)]
pub struct ImageBytes {
    label: String,
    bytes: Vec<u8>,
}

impl ImageBytes {
    pub fn new(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            bytes,
        }
    }
}

impl ImageSource for ImageBytes {
    fn label(&self) -> &str {
        &self.label
    }

    fn decode(&self) -> Result<DynamicImage> {
        Ok(image::load_from_memory(&self.bytes)?)
    }
}
