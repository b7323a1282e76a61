use crate::error::PipelineError;
use image::codecs::jpeg::JpegEncoder;
use image::GrayImage;

pub const CONTENT_TYPE: &str = "image/jpeg";

/// Encode a single-channel image as baseline JPEG
pub fn apply(gray: &GrayImage, quality: u8) -> Result<Vec<u8>, PipelineError> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .encode_image(gray)
        .map_err(|e| PipelineError::Processing(format!("Failed to encode JPEG: {}", e)))?;
    Ok(buffer)
}
