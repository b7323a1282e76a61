//! Connected-component labeling over a binary image
//!
//! Components are 4-connected. Labels are assigned in raster order of each
//! component's first pixel, starting at 1; 0 marks background.

use image::GrayImage;

/// Axis-aligned box around one component; starts inclusive, stops exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_start: u32,
    pub y_start: u32,
    pub x_stop: u32,
    pub y_stop: u32,
}

impl BoundingBox {
    fn at(x: u32, y: u32) -> Self {
        Self {
            x_start: x,
            y_start: y,
            x_stop: x + 1,
            y_stop: y + 1,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.x_start = self.x_start.min(x);
        self.y_start = self.y_start.min(y);
        self.x_stop = self.x_stop.max(x + 1);
        self.y_stop = self.y_stop.max(y + 1);
    }

    pub fn width(&self) -> u32 {
        self.x_stop - self.x_start
    }

    pub fn height(&self) -> u32 {
        self.y_stop - self.y_start
    }
}

/// Labels for every pixel plus one bounding box per label
#[derive(Debug, Clone)]
pub struct Labeling {
    width: u32,
    labels: Vec<u32>,
    boxes: Vec<BoundingBox>,
}

impl Labeling {
    /// Label of the pixel at (x, y), 0 for background
    #[cfg(test)]
    pub fn label(&self, x: u32, y: u32) -> u32 {
        self.labels[(y * self.width + x) as usize]
    }

    pub fn count(&self) -> usize {
        self.boxes.len()
    }

    /// Bounding boxes indexed by `label - 1`
    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }
}

/// Label the pixels of `image` for which `is_foreground` holds
pub fn label<F>(image: &GrayImage, is_foreground: F) -> Labeling
where
    F: Fn(u8) -> bool,
{
    let (width, height) = image.dimensions();
    let mut labels = vec![0u32; (width * height) as usize];
    let mut boxes = Vec::new();
    let mut stack = Vec::new();

    let foreground = |x: u32, y: u32| is_foreground(image.get_pixel(x, y).0[0]);

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            if labels[idx] != 0 || !foreground(x, y) {
                continue;
            }

            let current = boxes.len() as u32 + 1;
            let mut bbox = BoundingBox::at(x, y);
            labels[idx] = current;
            stack.push((x, y));

            while let Some((px, py)) = stack.pop() {
                bbox.include(px, py);

                let mut visit = |nx: u32, ny: u32| {
                    let nidx = (ny * width + nx) as usize;
                    if labels[nidx] == 0 && foreground(nx, ny) {
                        labels[nidx] = current;
                        stack.push((nx, ny));
                    }
                };

                if px > 0 {
                    visit(px - 1, py);
                }
                if px + 1 < width {
                    visit(px + 1, py);
                }
                if py > 0 {
                    visit(px, py - 1);
                }
                if py + 1 < height {
                    visit(px, py + 1);
                }
            }

            boxes.push(bbox);
        }
    }

    Labeling {
        width,
        labels,
        boxes,
    }
}
