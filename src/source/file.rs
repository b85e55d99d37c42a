use super::{ensure_non_empty, ImageSource};
use crate::error::Result;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Strip image stored on disk in any format the `image` crate can decode
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ImageSource for FileSource {
    fn load(&mut self) -> Result<DynamicImage> {
        tracing::info!("Decoding strip image {}", self.path.display());

        let image = image::open(&self.path)?;
        let image = ensure_non_empty(image)?;

        tracing::debug!("Decoded {}x{} image", image.width(), image.height());
        Ok(image)
    }

    fn reference(&self) -> String {
        self.path.display().to_string()
    }
}

/// Strip image already held in memory, e.g. an uploaded body
pub struct MemorySource {
    bytes: Vec<u8>,
    name: String,
}

impl MemorySource {
    pub fn new(bytes: Vec<u8>, name: impl Into<String>) -> Self {
        Self {
            bytes,
            name: name.into(),
        }
    }
}

impl ImageSource for MemorySource {
    fn load(&mut self) -> Result<DynamicImage> {
        let image = image::load_from_memory(&self.bytes)?;
        ensure_non_empty(image)
    }

    fn reference(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Stage};
    use image::{GrayImage, ImageFormat, Luma};
    use std::io::Cursor;

    #[test]
    fn test_memory_source_decodes_png() {
        let img = GrayImage::from_pixel(8, 6, Luma([200]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let mut source = MemorySource::new(bytes, "strip.png");
        let decoded = source.load().unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
        assert_eq!(source.reference(), "strip.png");
    }

    #[test]
    fn test_garbage_bytes_are_decode_errors() {
        let mut source = MemorySource::new(vec![0x13, 0x37, 0x00], "junk");
        let err = source.load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let mut source = FileSource::new("/nonexistent/strip.png");
        let err = source.load().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_zero_sized_image_rejected() {
        let err = ensure_non_empty(DynamicImage::new_luma8(0, 5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.stage(), Stage::Source);
    }
}
