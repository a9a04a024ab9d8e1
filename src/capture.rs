//! Debounced capture decisions and image rendering.
//!
//! The debouncer decides once per tick whether to crop, encode, and emit a
//! capture. Two gates apply in order: a hard rate limit (at most one capture
//! per debounce window regardless of anything else), then a match against the
//! target direction the enrollment flow currently wants. Capture state is an
//! explicit session-owned value, mutated only here.

use crate::{
    config::CaptureConfig,
    constants::{
        DEFAULT_CAPTURE_SIZE, DEFAULT_CROP_INSET_PX, DEFAULT_DEBOUNCE_WINDOW_MS,
        DEFAULT_JPEG_QUALITY,
    },
    detection::{BoundingBox, Face},
    direction::Direction,
    video::VideoFrame,
    Error, Result,
};
use image::{codecs::jpeg::JpegEncoder, imageops, imageops::FilterType};

/// Mutable per-session capture state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureState {
    /// Timestamp of the last accepted capture, if any
    pub last_capture_ms: Option<u64>,
    /// Minimum elapsed milliseconds between two accepted captures
    pub debounce_window_ms: u64,
    /// Direction the enrollment flow currently wants captured
    pub target: Direction,
    /// Ticks where the observed direction matched the target and the
    /// debounce gate passed
    pub match_count: u32,
}

impl CaptureState {
    #[must_use]
    pub fn new(target: Direction, debounce_window_ms: u64) -> Self {
        Self {
            last_capture_ms: None,
            debounce_window_ms,
            target,
            match_count: 0,
        }
    }

    /// Point the state at the next target direction.
    ///
    /// The match count resets; the last capture timestamp is kept so the
    /// global debounce invariant holds across step boundaries.
    pub fn retarget(&mut self, target: Direction) {
        self.target = target;
        self.match_count = 0;
    }
}

/// Why a tick produced no capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Inside the debounce window since the last accepted capture
    Debounced,
    /// Observed direction does not match the current target
    WrongDirection,
}

/// Encoded capture ready for the storage collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// JPEG-encoded bytes
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Direction label the capture was taken for
    pub label: Direction,
    /// `capture-{label}-{timestamp}.jpg`
    pub filename: String,
}

/// Per-tick capture decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureDecision {
    Skip(SkipReason),
    Capture(CapturedImage),
}

/// Capture decision logic plus crop/encode parameters
#[derive(Debug, Clone)]
pub struct CaptureDebouncer {
    output_size: u32,
    crop_inset_px: u32,
    jpeg_quality: u8,
}

impl Default for CaptureDebouncer {
    fn default() -> Self {
        Self {
            output_size: DEFAULT_CAPTURE_SIZE,
            crop_inset_px: DEFAULT_CROP_INSET_PX,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CaptureDebouncer {
    /// Create a debouncer from configured capture parameters
    #[must_use]
    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            output_size: config.output_size,
            crop_inset_px: config.crop_inset_px,
            jpeg_quality: config.jpeg_quality,
        }
    }

    /// Decide whether this tick produces a capture, and render it if so.
    ///
    /// Rules, in order: debounce gate, target match, then crop + resize +
    /// encode with `last_capture_ms` advanced to `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error if the crop rectangle cannot be formed or JPEG
    /// encoding fails; capture state is left untouched in that case.
    pub fn on_tick(
        &self,
        face: &Face,
        frame: &VideoFrame,
        direction: Direction,
        now_ms: u64,
        state: &mut CaptureState,
    ) -> Result<CaptureDecision> {
        if let Some(last) = state.last_capture_ms {
            if now_ms.saturating_sub(last) < state.debounce_window_ms {
                return Ok(CaptureDecision::Skip(SkipReason::Debounced));
            }
        }

        if direction != state.target {
            return Ok(CaptureDecision::Skip(SkipReason::WrongDirection));
        }

        let image = self.render(&face.bbox, frame, direction, now_ms)?;

        state.match_count += 1;
        state.last_capture_ms = Some(now_ms);
        log::debug!(
            "capture accepted: {} (match {} for {})",
            image.filename,
            state.match_count,
            state.target
        );

        Ok(CaptureDecision::Capture(image))
    }

    /// Crop the frame to the face box, resize to the capture canvas, and
    /// encode as maximum-quality JPEG
    fn render(
        &self,
        bbox: &BoundingBox,
        frame: &VideoFrame,
        label: Direction,
        now_ms: u64,
    ) -> Result<CapturedImage> {
        let (x, y, w, h) = self.crop_rect(bbox, frame.width(), frame.height())?;

        let crop = imageops::crop_imm(&frame.image, x, y, w, h).to_image();
        let resized = imageops::resize(
            &crop,
            self.output_size,
            self.output_size,
            FilterType::Triangle,
        );

        let mut bytes = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut bytes, self.jpeg_quality);
        resized.write_with_encoder(encoder)?;

        Ok(CapturedImage {
            bytes,
            width: self.output_size,
            height: self.output_size,
            label,
            filename: format!("capture-{}-{}.jpg", label.slug(), now_ms),
        })
    }

    /// Clamp the inset bounding box into the frame.
    ///
    /// The inset trims the box extent to exclude background around the head;
    /// the resulting rectangle always has at least one pixel on each side.
    fn crop_rect(
        &self,
        bbox: &BoundingBox,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<(u32, u32, u32, u32)> {
        if frame_width == 0 || frame_height == 0 {
            return Err(Error::InvalidInput("empty video frame".to_string()));
        }

        let inset = f64::from(self.crop_inset_px);

        let x = bbox.x.max(0.0) as u32;
        let y = bbox.y.max(0.0) as u32;
        let x = x.min(frame_width - 1);
        let y = y.min(frame_height - 1);

        let w = (bbox.width - inset).max(1.0) as u32;
        let h = (bbox.height - inset).max(1.0) as u32;
        let w = w.max(1).min(frame_width - x);
        let h = h.max(1).min(frame_height - y);

        Ok((x, y, w, h))
    }
}
