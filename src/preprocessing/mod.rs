//! Watermeter dial preprocessing
//!
//! Turns a raw dial photograph into a cleaned grayscale strip for OCR.

pub mod calibration;
pub mod pipeline;
pub mod steps;

pub use calibration::Calibration;
pub use pipeline::Pipeline;
