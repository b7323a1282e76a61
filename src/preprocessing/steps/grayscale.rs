use image::{GrayImage, Luma, RgbImage};

/// Convert to grayscale with ITU-R 601-2 luma weights
/// L = R * 299/1000 + G * 587/1000 + B * 114/1000, in 16-bit fixed point
pub fn apply(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        Luma([luma(r, g, b)])
    })
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}
