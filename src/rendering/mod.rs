//! Rendering: surface geometry, stroke style and the raster backing buffer

pub mod layout;
pub mod paint;
pub mod raster;

use base64::Engine as _;

use crate::{Error, Result};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A PNG snapshot of the surface, detached from the live pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl SignatureImage {
    /// Embeddable `data:image/png;base64,...` form of the image.
    pub fn to_data_url(&self) -> String {
        let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + self.png_data.len() * 4 / 3 + 4);
        url.push_str(PNG_DATA_URL_PREFIX);
        base64::engine::general_purpose::STANDARD.encode_string(&self.png_data, &mut url);
        url
    }

    /// Parse a PNG data URL back into an image, reading its pixel dimensions.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let payload = url
            .strip_prefix(PNG_DATA_URL_PREFIX)
            .ok_or_else(|| Error::InvalidInput("not a PNG data URL".into()))?;
        let png_data = base64::engine::general_purpose::STANDARD.decode(payload)?;
        Self::from_png(png_data)
    }

    pub fn from_png(png_data: Vec<u8>) -> Result<Self> {
        let pixmap = tiny_skia::Pixmap::decode_png(&png_data)
            .map_err(|e| Error::EncodeError(e.to_string()))?;
        Ok(Self {
            width: pixmap.width(),
            height: pixmap.height(),
            png_data,
        })
    }

    /// Decode into RGBA pixels (premultiplied), mainly for inspection.
    pub fn decode(&self) -> Result<tiny_skia::Pixmap> {
        tiny_skia::Pixmap::decode_png(&self.png_data).map_err(|e| Error::EncodeError(e.to_string()))
    }
}
