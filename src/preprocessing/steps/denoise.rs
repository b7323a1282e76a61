use crate::error::PipelineError;
use image::GrayImage;
use imageproc::filter::gaussian_blur_f32;

/// Smooth with an isotropic Gaussian of standard deviation `sigma`
/// Separable convolution; borders are padded by continuity
pub fn apply(gray: &GrayImage, sigma: f32) -> Result<GrayImage, PipelineError> {
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(PipelineError::Processing(format!(
            "blur sigma must be positive, got {}",
            sigma
        )));
    }
    Ok(gaussian_blur_f32(gray, sigma))
}
