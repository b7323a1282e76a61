//! Individual preprocessing steps

pub mod autocontrast;
pub mod components;
pub mod compose;
pub mod contrast;
pub mod denoise;
pub mod encode;
pub mod geometry;
pub mod grayscale;
pub mod isolate;
pub mod mask;
pub mod threshold;
