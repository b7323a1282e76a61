use crate::error::PipelineError;
use image::{DynamicImage, GrayImage, RgbImage};
use std::time::Instant;

use super::calibration::Calibration;
use super::steps::{
    autocontrast, components, compose, contrast, denoise, encode, geometry, grayscale, isolate,
    mask, threshold,
};

/// Timing information for a single preprocessing step
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone)]
pub struct PreprocessingResult {
    /// Preprocessed image
    pub image: GrayImage,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Connected ink components found in the composite
    pub components_found: usize,
    /// Components large enough to be digits
    pub components_kept: usize,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Encoded output ready to be stored
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub result: PreprocessingResult,
}

/// Output of the denoise-and-mask stage
struct MaskedDigits {
    image: GrayImage,
    components_found: usize,
    components_kept: usize,
}

/// Fixed sequence of transforms from a dial photo to an OCR-ready strip
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    calibration: Calibration,
}

impl Pipeline {
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration }
    }

    /// Decode raw object bytes, process them and encode the result as JPEG
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<ProcessedImage, PipelineError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| PipelineError::Decode(e.to_string()))?;

        let mut result = self.process(image)?;

        let start = Instant::now();
        let bytes = encode::apply(&result.image, self.calibration.jpeg_quality)?;
        result.steps.push(StepTiming {
            name: "encode".to_string(),
            time_ms: start.elapsed().as_millis() as u64,
        });

        Ok(ProcessedImage {
            bytes,
            content_type: encode::CONTENT_TYPE,
            result,
        })
    }

    /// Run every stage on a decoded image
    pub fn process(&self, image: DynamicImage) -> Result<PreprocessingResult, PipelineError> {
        let start = Instant::now();
        let mut steps_timing = Vec::new();
        let cal = &self.calibration;

        // Geometric normalization
        let img = self.run_step("mode", image, &mut steps_timing, geometry::into_working_mode)?;
        let img = self.run_step("deskew", img, &mut steps_timing, |img| {
            geometry::rotate(img, cal.deskew_degrees)
        })?;
        let img = self.run_step("crop", img, &mut steps_timing, |img| {
            geometry::crop(&img, cal.dial_crop)
        })?;
        let img = self.run_step("reorient", img, &mut steps_timing, |img| {
            Ok(geometry::rotate180(img))
        })?;
        let strip = self.run_step("autocontrast", img, &mut steps_timing, autocontrast::apply)?;

        // Color split, isolation and recomposition
        let regions = self.run_step("isolate", strip, &mut steps_timing, |strip| {
            isolate::apply(&strip, cal)
        })?;
        let composite = self.run_step("compose", regions, &mut steps_timing, |regions| {
            compose::apply(regions, cal)
        })?;

        let masked = self.mask_digits(&composite, &mut steps_timing)?;

        let enhanced = self.run_step("contrast", masked.image, &mut steps_timing, |img| {
            Ok(contrast::apply(&img, cal.contrast_factor))
        })?;

        let total_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "Preprocessing finished in {}ms: {} components, {} kept",
            total_time_ms,
            masked.components_found,
            masked.components_kept
        );

        Ok(PreprocessingResult {
            image: enhanced,
            total_time_ms,
            components_found: masked.components_found,
            components_kept: masked.components_kept,
            steps: steps_timing,
        })
    }

    /// Blank everything except digit-sized ink blobs
    fn mask_digits(
        &self,
        composite: &RgbImage,
        timings: &mut Vec<StepTiming>,
    ) -> Result<MaskedDigits, PipelineError> {
        let cal = &self.calibration;

        let gray = self.run_step("grayscale", composite, timings, |img| {
            Ok(grayscale::apply(img))
        })?;
        let blurred = self.run_step("blur", &gray, timings, |img| {
            denoise::apply(img, cal.blur_sigma)
        })?;
        let binary = self.run_step("threshold", &blurred, timings, |img| {
            Ok(threshold::apply(img, cal.binary_threshold))
        })?;
        let labeling = self.run_step("label", &binary, timings, |img| {
            Ok(components::label(img, threshold::is_ink))
        })?;

        let kept = mask::digit_sized(&labeling, cal.min_component_size);
        let image = self.run_step("mask", &gray, timings, |img| {
            let digit_mask = mask::build(img.width(), img.height(), &kept);
            Ok(mask::composite(img, &digit_mask))
        })?;

        Ok(MaskedDigits {
            image,
            components_found: labeling.count(),
            components_kept: kept.len(),
        })
    }

    fn run_step<I, O, F>(
        &self,
        name: &str,
        input: I,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<O, PipelineError>
    where
        F: FnOnce(I) -> Result<O, PipelineError>,
    {
        let step_start = Instant::now();
        let result = step_fn(input)?;
        timings.push(StepTiming {
            name: name.to_string(),
            time_ms: step_start.elapsed().as_millis() as u64,
        });
        Ok(result)
    }
}
