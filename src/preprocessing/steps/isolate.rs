use crate::error::PipelineError;
use crate::preprocessing::calibration::Calibration;
use crate::preprocessing::steps::geometry;
use image::{DynamicImage, Rgb, RgbImage};

/// The two digit groups of the dial, cut from the normalized strip
#[derive(Debug, Clone)]
pub struct DigitRegions {
    pub black: DynamicImage,
    pub red: RgbImage,
}

/// Split the strip into its black-ink and red-ink regions and recolor the
/// red digits black
pub fn apply(
    strip: &DynamicImage,
    calibration: &Calibration,
) -> Result<DigitRegions, PipelineError> {
    let black = geometry::crop(strip, calibration.black_region)?;
    let red = geometry::crop(strip, calibration.red_region)?.into_rgb8();
    let red = recolor_red_ink(red, calibration);
    Ok(DigitRegions { black, red })
}

/// Paint every red-ink pixel black, leaving all others as they are
pub fn recolor_red_ink(mut img: RgbImage, calibration: &Calibration) -> RgbImage {
    for pixel in img.pixels_mut() {
        if is_red_ink(pixel, calibration) {
            *pixel = Rgb([0, 0, 0]);
        }
    }
    img
}

fn is_red_ink(pixel: &Rgb<u8>, calibration: &Calibration) -> bool {
    let [r, g, b] = pixel.0;
    r > calibration.red_min && g < calibration.green_max && b < calibration.blue_max
}
