mod file;

pub use file::{FileSource, MemorySource};

use crate::error::{CtgError, Result, Stage};
use image::DynamicImage;

/// Trait for strip image sources
pub trait ImageSource {
    /// Decode the strip into an image
    fn load(&mut self) -> Result<DynamicImage>;

    /// Human readable reference to the image, used in records
    fn reference(&self) -> String;
}

/// Reject images with no pixels
pub(crate) fn ensure_non_empty(image: DynamicImage) -> Result<DynamicImage> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    if width == 0 || height == 0 {
        return Err(CtgError::EmptyImage {
            stage: Stage::Source,
            width,
            height,
        });
    }
    Ok(image)
}
