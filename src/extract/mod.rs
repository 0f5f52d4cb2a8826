//! Turns the final crop rectangle and the on-screen image bounds into pixels.
//!
//! Panning and zooming can leave the crop rectangle hanging over the edge of
//! the displayed image, so the extracted region is whatever actually overlaps.

use image::{imageops, RgbaImage};
use thiserror::Error;

use crate::geometry::CropRect;

/// Integer region inside the resampled source, in displayed-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("crop rectangle does not overlap the image ({width}x{height} remaining)")]
    NoOverlap { width: i32, height: i32 },
    #[error("crop rectangle overlaps the image by an empty region")]
    EmptyRegion,
    #[error("displayed image has no visible pixels ({width}x{height})")]
    HiddenImage { width: i32, height: i32 },
}

pub type CropResult = Result<RgbaImage, ExtractionFailure>;

/// Displayed rectangle snapped to whole pixels the way a view hit box is.
fn hit_rect(displayed: &CropRect) -> (i32, i32, i32, i32) {
    (
        displayed.left as i32,
        displayed.top as i32,
        displayed.right as i32,
        displayed.bottom as i32,
    )
}

pub fn extraction_region(
    crop: &CropRect,
    displayed: &CropRect,
) -> Result<PixelRegion, ExtractionFailure> {
    let (image_left, image_top, image_right, image_bottom) = hit_rect(displayed);

    let mut left_offset = (crop.left - image_left as f32) as i32;
    let mut top_offset = (crop.top - image_top as f32) as i32;
    let right_offset = (image_right as f32 - crop.right) as i32;
    let bottom_offset = (image_bottom as f32 - crop.bottom) as i32;
    let mut width = crop.width() as i32;
    let mut height = crop.height() as i32;

    if left_offset < 0 {
        width = width.saturating_add(left_offset);
        left_offset = 0;
    }
    if top_offset < 0 {
        height = height.saturating_add(top_offset);
        top_offset = 0;
    }
    if right_offset < 0 {
        width = width.saturating_add(right_offset);
    }
    if bottom_offset < 0 {
        height = height.saturating_add(bottom_offset);
    }
    if width < 0 || height < 0 {
        return Err(ExtractionFailure::NoOverlap { width, height });
    }
    if width == 0 || height == 0 {
        return Err(ExtractionFailure::EmptyRegion);
    }

    Ok(PixelRegion {
        x: left_offset.unsigned_abs(),
        y: top_offset.unsigned_abs(),
        width: width.unsigned_abs(),
        height: height.unsigned_abs(),
    })
}

/// Resamples `source` to the displayed size, then copies out the overlap with `crop`.
pub fn extract_crop(crop: &CropRect, displayed: &CropRect, source: &RgbaImage) -> CropResult {
    let (left, top, right, bottom) = hit_rect(displayed);
    let displayed_width = right.saturating_sub(left);
    let displayed_height = bottom.saturating_sub(top);
    if displayed_width <= 0 || displayed_height <= 0 || source.width() == 0 || source.height() == 0
    {
        return Err(ExtractionFailure::HiddenImage {
            width: displayed_width,
            height: displayed_height,
        });
    }

    let region = extraction_region(crop, displayed)?;
    let resampled = imageops::resize(
        source,
        displayed_width.unsigned_abs(),
        displayed_height.unsigned_abs(),
        imageops::FilterType::Nearest,
    );
    let max_width = resampled.width().saturating_sub(region.x);
    let max_height = resampled.height().saturating_sub(region.y);
    let width = region.width.min(max_width);
    let height = region.height.min(max_height);
    if width == 0 || height == 0 {
        return Err(ExtractionFailure::EmptyRegion);
    }

    Ok(imageops::crop_imm(&resampled, region.x, region.y, width, height).to_image())
}
