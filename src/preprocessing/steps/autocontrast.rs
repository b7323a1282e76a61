use crate::error::PipelineError;
use image::{DynamicImage, ImageBuffer, Pixel};

/// Stretch each channel so its darkest value maps to 0 and its lightest to 255
/// Channels are stretched independently; a flat channel is left untouched
pub fn apply(image: DynamicImage) -> Result<DynamicImage, PipelineError> {
    match image {
        DynamicImage::ImageLuma8(gray) => Ok(DynamicImage::ImageLuma8(stretch_channels(gray))),
        DynamicImage::ImageRgb8(rgb) => Ok(DynamicImage::ImageRgb8(stretch_channels(rgb))),
        other => Err(PipelineError::ColorConversion(format!(
            "cannot autocontrast {:?} image",
            other.color()
        ))),
    }
}

fn stretch_channels<P>(mut img: ImageBuffer<P, Vec<u8>>) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    let channels = P::CHANNEL_COUNT as usize;
    let luts: Vec<[u8; 256]> = (0..channels)
        .map(|c| {
            let (lo, hi) = find_min_max(img.as_raw().iter().skip(c).step_by(channels));
            stretch_lut(lo, hi)
        })
        .collect();

    for pixel in img.pixels_mut() {
        for (value, lut) in pixel.channels_mut().iter_mut().zip(&luts) {
            *value = lut[*value as usize];
        }
    }
    img
}

fn find_min_max<'a>(values: impl Iterator<Item = &'a u8>) -> (u8, u8) {
    let mut min = 255u8;
    let mut max = 0u8;

    for &val in values {
        min = min.min(val);
        max = max.max(val);
    }

    (min, max)
}

/// Lookup table mapping `lo..=hi` linearly onto `0..=255`
fn stretch_lut(lo: u8, hi: u8) -> [u8; 256] {
    let mut lut = [0u8; 256];
    if hi <= lo {
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    }

    let scale = 255.0 / (hi - lo) as f64;
    let offset = -(lo as f64) * scale;
    for (i, entry) in lut.iter_mut().enumerate() {
        let value = (i as f64 * scale + offset) as i32;
        *entry = value.clamp(0, 255) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_autocontrast_stretches_histogram() {
        // Low-contrast image (values 50-185)
        let img = GrayImage::from_fn(10, 10, |x, _| Luma([50 + x as u8 * 15]));

        let result = apply(DynamicImage::ImageLuma8(img)).unwrap().to_luma8();

        let (min, max) = find_min_max(result.as_raw().iter());
        assert_eq!(min, 0);
        assert_eq!(max, 255);
    }

    #[test]
    fn test_autocontrast_handles_uniform_image() {
        let img = GrayImage::from_pixel(10, 10, Luma([128]));

        let result = apply(DynamicImage::ImageLuma8(img)).unwrap().to_luma8();

        assert_eq!(result.get_pixel(0, 0).0[0], 128);
    }

    #[test]
    fn test_autocontrast_stretches_channels_independently() {
        let mut img = RgbImage::from_pixel(2, 1, Rgb([100, 0, 7]));
        img.put_pixel(1, 0, Rgb([185, 85, 7]));

        let result = apply(DynamicImage::ImageRgb8(img)).unwrap().to_rgb8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 0, 7]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 255, 7]);
    }

    #[test]
    fn test_autocontrast_top_value_can_truncate_below_255() {
        // 50 * (255 / 50) is 254.99999999999997 in f64 and truncates to 254
        let mut img = RgbImage::from_pixel(2, 1, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([50, 50, 50]));

        let result = apply(DynamicImage::ImageRgb8(img)).unwrap().to_rgb8();

        assert_eq!(result.get_pixel(1, 0).0, [254, 254, 254]);
        assert_eq!(stretch_lut(0, 50)[50], 254);
    }

    #[test]
    fn test_stretch_lut_truncates() {
        let lut = stretch_lut(10, 20);
        assert_eq!(lut[0], 0);
        assert_eq!(lut[10], 0);
        // 15 * 25.5 - 255 = 127.5
        assert_eq!(lut[15], 127);
        assert_eq!(lut[20], 255);
        assert_eq!(lut[255], 255);
    }
}
