//! Fixed calibration for the dial camera.
//!
//! Every value here depends on where the camera is mounted. The defaults are
//! the values the installation was calibrated with.

/// Rectangle in (left, top, right, bottom) form, right and bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// True when the rectangle is non-empty and lies within a `width`×`height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right > self.left
            && self.bottom > self.top
            && self.right <= width
            && self.bottom <= height
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Counter-clockwise de-skew angle in degrees
pub const DESKEW_DEGREES: f32 = 7.5;
/// Dial display region in the de-skewed photo
pub const DIAL_CROP: Rect = Rect::new(530, 670, 880, 740);
/// Digits printed in black ink, in the re-oriented strip
pub const BLACK_REGION: Rect = Rect::new(0, 0, 200, 70);
/// Digits printed in red ink, in the re-oriented strip
pub const RED_REGION: Rect = Rect::new(201, 1, 350, 70);
/// Where each region is pasted on the composite canvas
pub const BLACK_OFFSET: (u32, u32) = (0, 0);
pub const RED_OFFSET: (u32, u32) = (200, 1);
/// Composite canvas size
pub const CANVAS_SIZE: (u32, u32) = (350, 70);

/// A pixel is red ink when red > RED_MIN, green < GREEN_MAX and blue < BLUE_MAX
pub const RED_MIN: u8 = 150;
pub const GREEN_MAX: u8 = 100;
pub const BLUE_MAX: u8 = 100;

pub const BLUR_SIGMA: f32 = 2.0;
/// Smoothed values strictly above this become background
pub const BINARY_THRESHOLD: u8 = 128;
/// Components must be strictly wider and taller than this
pub const MIN_COMPONENT_SIZE: u32 = 10;
pub const CONTRAST_FACTOR: f32 = 1.5;
pub const JPEG_QUALITY: u8 = 75;

/// Calibration values consumed by the pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub deskew_degrees: f32,
    pub dial_crop: Rect,
    pub black_region: Rect,
    pub red_region: Rect,
    pub black_offset: (u32, u32),
    pub red_offset: (u32, u32),
    pub canvas_size: (u32, u32),
    pub red_min: u8,
    pub green_max: u8,
    pub blue_max: u8,
    pub blur_sigma: f32,
    pub binary_threshold: u8,
    pub min_component_size: u32,
    pub contrast_factor: f32,
    pub jpeg_quality: u8,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            deskew_degrees: DESKEW_DEGREES,
            dial_crop: DIAL_CROP,
            black_region: BLACK_REGION,
            red_region: RED_REGION,
            black_offset: BLACK_OFFSET,
            red_offset: RED_OFFSET,
            canvas_size: CANVAS_SIZE,
            red_min: RED_MIN,
            green_max: GREEN_MAX,
            blue_max: BLUE_MAX,
            blur_sigma: BLUR_SIGMA,
            binary_threshold: BINARY_THRESHOLD,
            min_component_size: MIN_COMPONENT_SIZE,
            contrast_factor: CONTRAST_FACTOR,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}
