//! Head pose estimation from facial landmarks.
//!
//! Yaw and pitch are unitless orientation proxies derived from the geometry
//! of the nose relative to the eye centers, not calibrated angles. The
//! estimator is a pure function of its input landmark set.

use crate::{
    constants::{NOSE_BRIDGE_INDEX, NOSE_TIP_INDEX, PITCH_NEUTRAL_OFFSET, PITCH_SCALE, YAW_SCALE},
    detection::{centroid, LandmarkSet},
    Error, Result,
};

/// Scalar head orientation estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Left-right rotation proxy; positive values lean toward Left
    pub yaw: f64,
    /// Up-down rotation proxy
    pub pitch: f64,
}

impl Pose {
    #[must_use]
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }
}

/// Landmark-geometry pose estimator
#[derive(Debug, Clone, Default)]
pub struct PoseEstimator {
    mirrored: bool,
}

impl PoseEstimator {
    /// Create a pose estimator.
    ///
    /// `mirrored` flips the yaw sign for horizontally mirrored camera feeds
    /// (common for self-facing webcams), where the signed eye distance would
    /// otherwise invert the Left/Right labels.
    #[must_use]
    pub fn new(mirrored: bool) -> Self {
        Self { mirrored }
    }

    /// Estimate head pose from one landmark set.
    ///
    /// # Errors
    ///
    /// - `Error::DetectorContract` if the landmark set violates the
    ///   detector's point-sequence contract
    /// - `Error::IndeterminatePose` if the geometry is degenerate (zero eye
    ///   distance or zero nose height); NaN must never reach the classifier
    pub fn estimate(&self, landmarks: &LandmarkSet) -> Result<Pose> {
        landmarks.validate()?;

        let left_eye_center = centroid(&landmarks.left_eye);
        let right_eye_center = centroid(&landmarks.right_eye);

        // Signed: assumes a canonical, non-mirrored camera orientation
        let eye_distance = right_eye_center.x - left_eye_center.x;

        let nose_bridge = landmarks.nose[NOSE_BRIDGE_INDEX];
        let nose_tip = landmarks.nose[NOSE_TIP_INDEX];

        let nose_center_x = (nose_bridge.x + nose_tip.x) / 2.0;
        let eyes_center_x = (left_eye_center.x + right_eye_center.x) / 2.0;
        let mut yaw = (nose_center_x - eyes_center_x) / eye_distance * YAW_SCALE;

        let eye_level = (left_eye_center.y + right_eye_center.y) / 2.0;
        let nose_height = nose_tip.y - nose_bridge.y;
        let pitch = ((nose_tip.y - eye_level) / nose_height - PITCH_NEUTRAL_OFFSET) * PITCH_SCALE;

        if !yaw.is_finite() || !pitch.is_finite() {
            return Err(Error::IndeterminatePose);
        }

        if self.mirrored {
            yaw = -yaw;
        }

        Ok(Pose::new(yaw, pitch))
    }
}
