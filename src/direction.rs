//! Discrete direction classification of pose estimates.
//!
//! The classifier maps a `(yaw, pitch)` pair to one of five labels through a
//! strict priority order: the pitch branch is consulted first, then the yaw
//! branch, then the `Straight` default. Either branch can fall through even
//! when its magnitude threshold is exceeded (pitch between the two bounds, or
//! yaw inside the dead band); ambiguous poses deliberately resolve to
//! `Straight` rather than an error.

use crate::{
    config::ClassifierConfig,
    constants::{
        DEFAULT_PITCH_LOWER_BOUND, DEFAULT_PITCH_THRESHOLD, DEFAULT_PITCH_UPPER_BOUND,
        DEFAULT_YAW_THRESHOLD, YAW_LEFT_BOUND, YAW_VERTICAL_GATE,
    },
    pose_estimation::Pose,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete head direction label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Straight,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Human-readable label, as shown in overlay feedback
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Straight => "Straight",
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }

    /// Lowercase label used in capture filenames
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Direction::Straight => "straight",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prioritized threshold classifier for pose estimates
#[derive(Debug, Clone)]
pub struct DirectionClassifier {
    yaw_threshold: f64,
    pitch_threshold: f64,
    pitch_upper_bound: f64,
    pitch_lower_bound: f64,
}

impl Default for DirectionClassifier {
    fn default() -> Self {
        Self {
            yaw_threshold: DEFAULT_YAW_THRESHOLD,
            pitch_threshold: DEFAULT_PITCH_THRESHOLD,
            pitch_upper_bound: DEFAULT_PITCH_UPPER_BOUND,
            pitch_lower_bound: DEFAULT_PITCH_LOWER_BOUND,
        }
    }
}

impl DirectionClassifier {
    /// Create a classifier from configured thresholds
    #[must_use]
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self {
            yaw_threshold: config.yaw_threshold,
            pitch_threshold: config.pitch_threshold,
            pitch_upper_bound: config.pitch_upper_bound,
            pitch_lower_bound: config.pitch_lower_bound,
        }
    }

    /// Classify a pose into a direction label.
    ///
    /// Pure and deterministic; the fallthrough order must be preserved
    /// exactly (see module docs).
    #[must_use]
    pub fn classify(&self, pose: Pose) -> Direction {
        if pose.pitch.abs() > self.pitch_threshold {
            if pose.pitch < self.pitch_upper_bound && pose.yaw < YAW_VERTICAL_GATE {
                return Direction::Up;
            }
            if pose.pitch > self.pitch_lower_bound && pose.yaw < YAW_VERTICAL_GATE {
                return Direction::Down;
            }
        }

        if pose.yaw.abs() > self.yaw_threshold {
            if pose.yaw < 0.0 {
                return Direction::Right;
            }
            if pose.yaw > YAW_LEFT_BOUND {
                return Direction::Left;
            }
        }

        Direction::Straight
    }
}
