use image::{GrayImage, Luma};

/// Linear contrast enhancement around the image's own mean intensity
/// out = mean + (in - mean) * factor, truncated and clamped to 0..=255
pub fn apply(gray: &GrayImage, factor: f32) -> GrayImage {
    let mean = rounded_mean(gray) as f32;
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = gray.get_pixel(x, y).0[0] as f32;
        let enhanced = mean + factor * (value - mean);
        Luma([enhanced.clamp(0.0, 255.0) as u8])
    })
}

fn rounded_mean(gray: &GrayImage) -> u8 {
    let count = gray.as_raw().len() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = gray.as_raw().iter().map(|&v| v as u64).sum();
    (sum as f64 / count as f64 + 0.5) as u8
}
