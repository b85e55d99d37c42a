use super::types::IntensityGrid;
use crate::error::{CtgError, Result, Stage};
use image::{DynamicImage, GenericImageView};
use ndarray::{Array2, ArrayView2};

/// Midpoint of the 8-bit intensity range
pub const INTENSITY_MIDPOINT: f64 = 127.5;

/// Convert a decoded image into a single-channel intensity grid
///
/// Grayscale inputs are taken as-is; colour inputs are reduced with the
/// ITU-R BT.601 luma weights.
pub fn intensity_grid(image: &DynamicImage) -> Result<IntensityGrid> {
    let _span = tracing::debug_span!("intensity_grid").entered();

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(CtgError::EmptyImage {
            stage: Stage::Extraction,
            width: width as usize,
            height: height as usize,
        });
    }

    let shape = (height as usize, width as usize);
    let grid = match image {
        DynamicImage::ImageLuma8(gray) => {
            Array2::from_shape_fn(shape, |(y, x)| gray.get_pixel(x as u32, y as u32)[0])
        }
        other => {
            let rgb = other.to_rgb8();
            Array2::from_shape_fn(shape, |(y, x)| {
                let pixel = rgb.get_pixel(x as u32, y as u32);
                luma(pixel[0], pixel[1], pixel[2])
            })
        }
    };

    Ok(grid)
}

/// Make ink the bright value regardless of how the strip was scanned
///
/// Predominantly light grids (dark ink on paper) are inverted; predominantly
/// dark grids are already in ink-is-bright polarity and are copied unchanged.
pub fn normalize_polarity(grid: ArrayView2<'_, u8>) -> IntensityGrid {
    let _span = tracing::debug_span!("normalize_polarity").entered();

    let mean = mean_intensity(grid);
    if mean > INTENSITY_MIDPOINT {
        tracing::debug!("Mean intensity {:.1} is light, inverting", mean);
        grid.mapv(|v| u8::MAX - v)
    } else {
        tracing::debug!("Mean intensity {:.1} is dark, keeping polarity", mean);
        grid.to_owned()
    }
}

pub fn mean_intensity(grid: ArrayView2<'_, u8>) -> f64 {
    if grid.is_empty() {
        return 0.0;
    }
    let sum: u64 = grid.iter().map(|&v| v as u64).sum();
    sum as f64 / grid.len() as f64
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    y.round().clamp(0.0, 255.0) as u8
}
