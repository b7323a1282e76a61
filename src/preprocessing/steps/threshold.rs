use image::{GrayImage, Luma};

/// Value written for background pixels (smoothed value above the threshold)
pub const BACKGROUND: u8 = 1;
/// Value written for ink pixels
pub const INK: u8 = 0;

/// Fixed-level binarization: strictly above `level` becomes 1, the rest 0
///
/// The output is a 0/1 image, not 0/255. Consumers only test for `== 0`.
pub fn apply(gray: &GrayImage, level: u8) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] > level {
            Luma([BACKGROUND])
        } else {
            Luma([INK])
        }
    })
}

/// Whether a binarized pixel counts as ink
pub fn is_ink(value: u8) -> bool {
    value == INK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_outputs_zero_or_one() {
        let img = GrayImage::from_fn(256, 1, |x, _| Luma([x as u8]));
        let result = apply(&img, 128);

        for (x, pixel) in result.pixels().enumerate() {
            let expected = if x > 128 { BACKGROUND } else { INK };
            assert_eq!(pixel.0[0], expected, "at value {}", x);
        }
    }

    #[test]
    fn test_threshold_boundary_is_ink() {
        let img = GrayImage::from_pixel(1, 1, Luma([128]));
        assert!(is_ink(apply(&img, 128).get_pixel(0, 0).0[0]));
    }

    #[test]
    fn test_ink_test_agrees_with_0_255_encoding() {
        // A 0/255 binarization marks exactly the same pixels as ink
        let img = GrayImage::from_fn(256, 1, |x, _| Luma([x as u8]));
        let zero_one = apply(&img, 128);
        let zero_255 = GrayImage::from_fn(256, 1, |x, _| {
            Luma([if img.get_pixel(x, 0).0[0] > 128 { 255 } else { 0 }])
        });

        for (a, b) in zero_one.pixels().zip(zero_255.pixels()) {
            assert_eq!(is_ink(a.0[0]), is_ink(b.0[0]));
        }
    }
}
