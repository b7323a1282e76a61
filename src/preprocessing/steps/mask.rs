use crate::preprocessing::steps::components::{BoundingBox, Labeling};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

pub const KEEP: u8 = 255;
pub const BLANK: u8 = 0;

/// Boxes strictly wider and strictly taller than `min_size`
pub fn digit_sized(labeling: &Labeling, min_size: u32) -> Vec<BoundingBox> {
    labeling
        .boxes()
        .iter()
        .copied()
        .filter(|b| b.width() > min_size && b.height() > min_size)
        .collect()
}

/// Mask with every box filled solid
///
/// Rectangles span start to stop inclusive on both axes and are clipped to
/// the image, so a box grows by one pixel to the right and bottom.
pub fn build(width: u32, height: u32, boxes: &[BoundingBox]) -> GrayImage {
    let mut mask = GrayImage::from_pixel(width, height, Luma([BLANK]));
    for b in boxes {
        let rect = Rect::at(b.x_start as i32, b.y_start as i32)
            .of_size(b.width() + 1, b.height() + 1);
        draw_filled_rect_mut(&mut mask, rect, Luma([KEEP]));
    }
    mask
}

/// Keep `gray` where the mask is set, white everywhere else
pub fn composite(gray: &GrayImage, mask: &GrayImage) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if mask.get_pixel(x, y).0[0] == KEEP {
            *gray.get_pixel(x, y)
        } else {
            Luma([255])
        }
    })
}
