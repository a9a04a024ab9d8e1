//! Landmark and detection types shared across the pipeline.
//!
//! The external face detector delivers, per video frame, zero or more faces
//! with a bounding box and a landmark set following the 68-point convention:
//! the nose sequence must address index 6 (the nose tip), the eye sequences
//! are point rings of arbitrary non-zero length. These shapes are validated
//! at the tick boundary rather than trusted implicitly.

use crate::{
    constants::{MIN_NOSE_POINTS, NOSE_TIP_INDEX},
    video::VideoFrame,
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// A 2D landmark point in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Arithmetic mean of a point sequence, x and y independently.
///
/// Returns the origin for an empty slice; callers validate emptiness first.
#[must_use]
pub fn centroid(points: &[Point2]) -> Point2 {
    if points.is_empty() {
        return Point2::default();
    }
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    Point2::new(sum_x / n, sum_y / n)
}

/// Axis-aligned face bounding box in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Facial landmark point groups for one detected face
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkSet {
    /// Nose point sequence; index 3 is the bridge, index 6 the tip
    pub nose: Vec<Point2>,
    /// Left eye point ring
    pub left_eye: Vec<Point2>,
    /// Right eye point ring
    pub right_eye: Vec<Point2>,
}

impl LandmarkSet {
    /// Check the detector's point-sequence contract.
    ///
    /// # Errors
    ///
    /// Returns `Error::DetectorContract` if the nose cannot address index
    /// 6 or either eye ring is empty.
    pub fn validate(&self) -> Result<()> {
        if self.nose.len() < MIN_NOSE_POINTS {
            return Err(Error::DetectorContract(format!(
                "nose sequence has {} points, index {} not addressable",
                self.nose.len(),
                NOSE_TIP_INDEX
            )));
        }
        if self.left_eye.is_empty() {
            return Err(Error::DetectorContract("left eye ring is empty".to_string()));
        }
        if self.right_eye.is_empty() {
            return Err(Error::DetectorContract("right eye ring is empty".to_string()));
        }
        Ok(())
    }
}

/// One detected face: bounding box plus landmarks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Face {
    pub bbox: BoundingBox,
    pub landmarks: LandmarkSet,
}

/// All faces detected in one video frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionFrame {
    pub faces: Vec<Face>,
}

impl DetectionFrame {
    #[must_use]
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }
}

/// External face detector collaborator, called once per tick.
///
/// Latency and accuracy are the collaborator's responsibility; the pipeline
/// treats a failed call as a skipped tick and continues on the next one.
#[allow(async_fn_in_trait)]
pub trait FaceDetector {
    /// Detect faces and landmarks in the given video frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the detection call fails; never fatal to the
    /// scheduling loop.
    async fn detect(&mut self, frame: &VideoFrame) -> Result<DetectionFrame>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 4.0),
            Point2::new(0.0, 4.0),
        ];
        let c = centroid(&points);
        assert_eq!(c.x, 1.0);
        assert_eq!(c.y, 2.0);
    }

    #[test]
    fn test_centroid_empty() {
        let c = centroid(&[]);
        assert_eq!(c.x, 0.0);
        assert_eq!(c.y, 0.0);
    }

    #[test]
    fn test_validate_short_nose() {
        let landmarks = LandmarkSet {
            nose: vec![Point2::default(); 6],
            left_eye: vec![Point2::default(); 4],
            right_eye: vec![Point2::default(); 4],
        };
        assert!(matches!(
            landmarks.validate(),
            Err(Error::DetectorContract(_))
        ));
    }

    #[test]
    fn test_validate_empty_eye() {
        let landmarks = LandmarkSet {
            nose: vec![Point2::default(); 9],
            left_eye: Vec::new(),
            right_eye: vec![Point2::default(); 4],
        };
        assert!(matches!(
            landmarks.validate(),
            Err(Error::DetectorContract(_))
        ));
    }

    #[test]
    fn test_validate_ok() {
        let landmarks = LandmarkSet {
            nose: vec![Point2::default(); 7],
            left_eye: vec![Point2::default(); 1],
            right_eye: vec![Point2::default(); 1],
        };
        assert!(landmarks.validate().is_ok());
    }
}
