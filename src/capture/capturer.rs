use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use log::debug;

use super::types::CapturedFrame;
use crate::error::CaptureError;
use crate::feed::VideoSource;

/// Snapshots the source's current frame into an encoded still.
///
/// Each call decodes into its own off-screen raster and encodes
/// independently; no surface is retained between captures, so repeated
/// calls cannot interfere with each other.
pub struct FrameCapturer {
    jpeg_quality: u8,
}

impl FrameCapturer {
    pub fn new(jpeg_quality: u8) -> Self {
        Self { jpeg_quality }
    }

    /// Render the source's current content into a raster sized to the
    /// source's display dimensions and encode it as a lossy JPEG.
    ///
    /// Callers are expected to make sure the source is ready; a source
    /// that has not produced a frame fails here. A degenerate source
    /// yields a degenerate still, never a panic.
    pub fn capture(&self, source: &dyn VideoSource) -> Result<CapturedFrame, CaptureError> {
        let frame = source.latest_frame().ok_or(CaptureError::NoFrame)?;

        let decoded = image::load_from_memory(&frame.bytes)
            .map_err(|e| CaptureError::Decode(e.to_string()))?;
        let raster = decoded.to_rgb8();

        let (width, height) = source.dimensions().unwrap_or_else(|| raster.dimensions());
        let raster = if raster.dimensions() == (width, height) {
            raster
        } else {
            imageops::resize(&raster, width, height, FilterType::Triangle)
        };

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.jpeg_quality)
            .encode(raster.as_raw(), width, height, image::ColorType::Rgb8)
            .map_err(|e| CaptureError::Encode(e.to_string()))?;

        debug!(
            "captured still from feed frame {} ({}x{}, {} bytes)",
            frame.sequence,
            width,
            height,
            jpeg.len()
        );

        Ok(CapturedFrame::new(jpeg, width, height))
    }
}
