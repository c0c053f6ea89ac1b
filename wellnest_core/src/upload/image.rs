use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::UploadError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Image payload held in memory.
    Encoded { mime: String, bytes: Vec<u8> },
    /// Reference to an image somewhere else (the no-camera placeholder).
    Remote(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    source: ImageSource,
    dimensions: Option<(u32, u32)>,
}

impl CapturedImage {
    /// JPEG-encodes a captured camera frame.
    pub fn from_frame(frame: &RgbaImage) -> Result<Self, UploadError> {
        let rgb = DynamicImage::ImageRgba8(frame.clone()).to_rgb8();
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;
        Ok(Self {
            source: ImageSource::Encoded {
                mime: ImageFormat::Jpeg.to_mime_type().to_string(),
                bytes,
            },
            dimensions: Some(frame.dimensions()),
        })
    }

    /// Validates a picked gallery file and keeps its original encoding.
    pub fn from_gallery_bytes(bytes: Vec<u8>) -> Result<Self, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Gallery("file is empty".into()));
        }
        let format = image::guess_format(&bytes)
            .map_err(|err| UploadError::Gallery(err.to_string()))?;
        let decoded = image::load_from_memory_with_format(&bytes, format)
            .map_err(|err| UploadError::Gallery(err.to_string()))?;
        Ok(Self {
            source: ImageSource::Encoded {
                mime: format.to_mime_type().to_string(),
                bytes,
            },
            dimensions: Some((decoded.width(), decoded.height())),
        })
    }

    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Remote(url.into()),
            dimensions: None,
        }
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.source {
            ImageSource::Encoded { bytes, .. } => Some(bytes),
            ImageSource::Remote(_) => None,
        }
    }

    /// Reference usable as a post image: the remote URL or a `data:` URI.
    pub fn to_image_ref(&self) -> String {
        match &self.source {
            ImageSource::Encoded { mime, bytes } => {
                format!("data:{mime};base64,{}", STANDARD.encode(bytes))
            }
            ImageSource::Remote(url) => url.clone(),
        }
    }
}

/// Splits a base64 `data:` URI into its media type and payload.
pub fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some((mime.to_string(), bytes))
}

pub fn read_gallery_file(path: &Path) -> Result<Vec<u8>, UploadError> {
    std::fs::read(path)
        .map_err(|err| UploadError::Gallery(format!("{}: {err}", path.display())))
}
