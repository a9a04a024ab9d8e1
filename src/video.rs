//! Video source collaborator interface.
//!
//! The pipeline reads decodable frames from a live source (camera stream in
//! the browser deployment, a synthetic or recorded source in tests and
//! replay). Device permissions and stream lifecycle belong to the
//! collaborator, not to this core.

use crate::Result;
use image::RgbImage;

/// One decodable video frame
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub image: RgbImage,
}

impl VideoFrame {
    #[must_use]
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Supplier of the current video frame, read once per tick
pub trait VideoSource {
    /// Snapshot the current frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot produce a frame; the scheduler
    /// treats this as a skipped tick.
    fn frame(&mut self) -> Result<VideoFrame>;
}

/// Fixed-content frame source for replay runs and tests
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    frame: VideoFrame,
}

impl SyntheticSource {
    /// Create a source producing a flat mid-gray frame of the given size
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let image = RgbImage::from_pixel(width, height, image::Rgb([128, 128, 128]));
        Self {
            frame: VideoFrame::new(image),
        }
    }
}

impl VideoSource for SyntheticSource {
    fn frame(&mut self) -> Result<VideoFrame> {
        Ok(self.frame.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_source_dimensions() {
        let mut source = SyntheticSource::new(320, 240);
        let frame = source.frame().unwrap();
        assert_eq!(frame.width(), 320);
        assert_eq!(frame.height(), 240);
    }
}
