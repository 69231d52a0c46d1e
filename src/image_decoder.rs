use std::io::Cursor;
use std::sync::Arc;

use base64::{engine::general_purpose, Engine};
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::DecodeError;

/// Raster image decoded from a request payload; clones share the raster
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: Arc<DynamicImage>,
    format: ImageFormat,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Container format the payload arrived in
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Re-encode the raster as PNG bytes
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        self.image.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}

/// Decode a base64 image payload, optionally wrapped in a `data:` URL.
pub fn decode(base64_image: &str) -> Result<DecodedImage, DecodeError> {
    let payload = strip_data_url(base64_image.trim());
    if payload.is_empty() {
        return Err(DecodeError::Empty);
    }

    // MIME-style payloads wrap lines every 76 columns
    let payload: String = payload.split_ascii_whitespace().collect();
    let bytes = general_purpose::STANDARD.decode(payload)?;
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = match image::guess_format(&bytes) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => format,
        Ok(other) => return Err(DecodeError::UnsupportedFormat(format!("{:?}", other))),
        Err(_) => return Err(DecodeError::UnsupportedFormat("unrecognised".to_string())),
    };

    let image = image::load_from_memory_with_format(&bytes, format)?;
    debug!(
        "Decoded {:?} image {}x{} ({} bytes)",
        format,
        image.width(),
        image.height(),
        bytes.len()
    );

    Ok(DecodedImage {
        image: Arc::new(image),
        format,
    })
}

fn strip_data_url(payload: &str) -> &str {
    if payload.starts_with("data:") {
        if let Some((_, data)) = payload.split_once(";base64,") {
            return data;
        }
    }
    payload
}
