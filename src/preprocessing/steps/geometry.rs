use crate::error::PipelineError;
use crate::preprocessing::calibration::Rect;
use image::{DynamicImage, GenericImageView, Luma, Rgb};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};

/// Bring a decoded image into one of the two working modes (8-bit gray or RGB)
/// Alpha is dropped; deeper sample formats are rejected
pub fn into_working_mode(image: DynamicImage) -> Result<DynamicImage, PipelineError> {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Ok(image),
        DynamicImage::ImageLumaA8(_) => Ok(DynamicImage::ImageLuma8(image.into_luma8())),
        DynamicImage::ImageRgba8(_) => Ok(DynamicImage::ImageRgb8(image.into_rgb8())),
        other => Err(PipelineError::ColorConversion(format!(
            "{:?} is not an 8-bit gray or RGB image",
            other.color()
        ))),
    }
}

/// Rotate counter-clockwise by `degrees` about the center
/// The canvas keeps its size; uncovered pixels are black
pub fn rotate(image: DynamicImage, degrees: f32) -> Result<DynamicImage, PipelineError> {
    // imageproc rotates clockwise for positive angles
    let theta = -degrees.to_radians();
    match image {
        DynamicImage::ImageLuma8(gray) => Ok(DynamicImage::ImageLuma8(rotate_about_center(
            &gray,
            theta,
            Interpolation::Nearest,
            Luma([0u8]),
        ))),
        DynamicImage::ImageRgb8(rgb) => Ok(DynamicImage::ImageRgb8(rotate_about_center(
            &rgb,
            theta,
            Interpolation::Nearest,
            Rgb([0u8, 0, 0]),
        ))),
        other => Err(PipelineError::ColorConversion(format!(
            "cannot rotate {:?} image",
            other.color()
        ))),
    }
}

/// Crop to `rect`, failing when it does not lie inside the image
pub fn crop(image: &DynamicImage, rect: Rect) -> Result<DynamicImage, PipelineError> {
    let (width, height) = image.dimensions();
    if !rect.fits_within(width, height) {
        return Err(PipelineError::CropOutOfBounds {
            rect: rect.to_string(),
            width,
            height,
        });
    }
    Ok(image.crop_imm(rect.left, rect.top, rect.width(), rect.height()))
}

/// Turn the image upside down
pub fn rotate180(image: DynamicImage) -> DynamicImage {
    image.rotate180()
}
