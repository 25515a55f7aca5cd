//! Photo storage and the photo viewer.

use crate::errors::{AppError, AppResult};
use crate::models::{Record, Table};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;

/// Re-encode an image as JPEG at `quality` and return it base64-encoded.
pub fn encode_photo(bytes: &[u8], quality: u8) -> AppResult<String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| AppError::Photo(format!("cannot decode image: {e}")))?;

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|e| AppError::Photo(format!("cannot encode JPEG: {e}")))?;

    tracing::debug!(bytes = buf.len(), quality, "photo re-encoded");
    Ok(STANDARD.encode(&buf))
}

/// Raw image bytes stored in `record`.
pub fn decode_photo(record: &Record) -> AppResult<Vec<u8>> {
    if !record.has_photo() {
        return Err(AppError::PhotoNotFound(record.label()));
    }
    STANDARD
        .decode(record.photo.trim())
        .map_err(|e| AppError::Photo(format!("stored photo is not valid base64: {e}")))
}

/// Records that carry a photo, selectable by position or label.
pub struct PhotoViewer<'a> {
    entries: Vec<&'a Record>,
}

impl<'a> PhotoViewer<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            entries: table.with_photos(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|r| r.label()).collect()
    }

    /// `selector` is a 1-based position in [`labels`](Self::labels) or an
    /// exact label.
    pub fn select(&self, selector: &str) -> AppResult<&'a Record> {
        let selector = selector.trim();

        if let Ok(n) = selector.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| self.entries.get(i))
                .copied()
                .ok_or_else(|| AppError::PhotoNotFound(selector.to_string()));
        }

        self.entries
            .iter()
            .find(|r| r.label() == selector)
            .copied()
            .ok_or_else(|| AppError::PhotoNotFound(selector.to_string()))
    }

    pub fn decode(&self, selector: &str) -> AppResult<Vec<u8>> {
        decode_photo(self.select(selector)?)
    }
}
