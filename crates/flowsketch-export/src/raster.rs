//! Raster capture and PNG encoding.

use crate::error::{ExportError, ExportResult};

/// An RGBA8 image buffer captured from the canvas render region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA rows, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// Collaborator producing a snapshot of the current canvas render region.
///
/// Capture is synchronous: the snapshot is taken before the export path
/// yields, so a user edit during an in-flight export is simply not part of
/// that export's output.
pub trait CaptureSource: Send + Sync {
    fn capture(&self) -> ExportResult<RasterImage>;
}

/// Encode a captured RGBA buffer as PNG bytes.
pub fn encode_png(image: &RasterImage) -> ExportResult<Vec<u8>> {
    let expected = image.width as usize * image.height as usize * 4;
    if image.rgba.len() != expected {
        return Err(ExportError::Encode(format!(
            "buffer is {} bytes, expected {} for {}x{} RGBA",
            image.rgba.len(),
            expected,
            image.width,
            image.height
        )));
    }

    let mut data = Vec::new();
    let mut encoder = png::Encoder::new(&mut data, image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    writer
        .write_image_data(&image.rgba)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(data)
}
