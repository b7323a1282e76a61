use crate::error::PipelineError;
use crate::preprocessing::calibration::Calibration;
use crate::preprocessing::steps::isolate::DigitRegions;
use image::{imageops, RgbImage};

/// Paste both digit regions onto a fresh black canvas
pub fn apply(regions: DigitRegions, calibration: &Calibration) -> Result<RgbImage, PipelineError> {
    let (width, height) = calibration.canvas_size;
    let mut canvas = RgbImage::new(width, height);

    paste(&mut canvas, &regions.black.into_rgb8(), calibration.black_offset)?;
    paste(&mut canvas, &regions.red, calibration.red_offset)?;

    Ok(canvas)
}

fn paste(
    canvas: &mut RgbImage,
    region: &RgbImage,
    (x, y): (u32, u32),
) -> Result<(), PipelineError> {
    if x + region.width() > canvas.width() || y + region.height() > canvas.height() {
        return Err(PipelineError::Processing(format!(
            "{}x{} region at ({}, {}) does not fit {}x{} canvas",
            region.width(),
            region.height(),
            x,
            y,
            canvas.width(),
            canvas.height()
        )));
    }
    imageops::replace(canvas, region, x as i64, y as i64);
    Ok(())
}
