//! Configuration management for the enrollment pipeline

use crate::{
    constants::{
        DEFAULT_CAPTURES_PER_DIRECTION, DEFAULT_CAPTURE_SIZE, DEFAULT_CROP_INSET_PX,
        DEFAULT_DEBOUNCE_WINDOW_MS, DEFAULT_JPEG_QUALITY, DEFAULT_PITCH_LOWER_BOUND,
        DEFAULT_PITCH_THRESHOLD, DEFAULT_PITCH_UPPER_BOUND, DEFAULT_TICK_PERIOD_MS,
        DEFAULT_YAW_THRESHOLD,
    },
    direction::Direction,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pose estimation configuration
    pub pose: PoseConfig,

    /// Direction classifier thresholds
    pub classifier: ClassifierConfig,

    /// Capture and debounce configuration
    pub capture: CaptureConfig,

    /// Scheduler configuration
    pub scheduler: SchedulerConfig,

    /// Storage collaborator configuration
    pub storage: StorageConfig,

    /// Enrollment plan configuration
    pub enrollment: EnrollmentConfig,
}

/// Pose estimation parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseConfig {
    /// Whether the video feed is horizontally mirrored (self-facing webcam);
    /// flips the yaw sign so Left/Right labels stay correct
    pub mirrored: bool,
}

/// Direction classifier thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Yaw magnitude above which the yaw branch engages
    pub yaw_threshold: f64,

    /// Pitch magnitude above which the pitch branch engages
    pub pitch_threshold: f64,

    /// Pitch values below this (with low yaw) classify as Up
    pub pitch_upper_bound: f64,

    /// Pitch values above this (with low yaw) classify as Down;
    /// deployments have used 140 and 160
    pub pitch_lower_bound: f64,
}

/// Capture and debounce parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Minimum elapsed milliseconds between two accepted captures
    pub debounce_window_ms: u64,

    /// Side length of the square capture canvas in pixels
    pub output_size: u32,

    /// Pixels trimmed from the bounding box extent before cropping;
    /// deployments have used 0 and 50
    pub crop_inset_px: u32,

    /// JPEG quality for encoded captures (1-100)
    pub jpeg_quality: u8,
}

/// Scheduler parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Fixed tick period in milliseconds
    pub tick_period_ms: u64,
}

/// Storage sink selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Write captures into a local directory
    Disk,
    /// POST captures to an HTTP endpoint as a multipart form
    Http,
}

/// Storage collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which sink to use
    pub mode: StorageMode,

    /// Capture directory for `disk` mode
    pub output_dir: PathBuf,

    /// Save-image endpoint for `http` mode
    pub endpoint: String,
}

/// Enrollment plan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentConfig {
    /// Ordered target directions
    pub directions: Vec<Direction>,

    /// Captures collected per direction before advancing
    pub captures_per_direction: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            yaw_threshold: DEFAULT_YAW_THRESHOLD,
            pitch_threshold: DEFAULT_PITCH_THRESHOLD,
            pitch_upper_bound: DEFAULT_PITCH_UPPER_BOUND,
            pitch_lower_bound: DEFAULT_PITCH_LOWER_BOUND,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
            output_size: DEFAULT_CAPTURE_SIZE,
            crop_inset_px: DEFAULT_CROP_INSET_PX,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mode: StorageMode::Disk,
            output_dir: PathBuf::from("captures"),
            endpoint: "http://127.0.0.1:8000/api/save-image".to_string(),
        }
    }
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            directions: vec![
                Direction::Straight,
                Direction::Left,
                Direction::Right,
                Direction::Up,
                Direction::Down,
            ],
            captures_per_direction: DEFAULT_CAPTURES_PER_DIRECTION,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.classifier.yaw_threshold <= 0.0 {
            return Err(Error::Config("yaw threshold must be positive".to_string()));
        }
        if self.classifier.pitch_threshold <= 0.0 {
            return Err(Error::Config("pitch threshold must be positive".to_string()));
        }
        if self.classifier.pitch_upper_bound >= self.classifier.pitch_lower_bound {
            return Err(Error::Config(
                "pitch upper bound must be below the lower bound".to_string(),
            ));
        }

        if self.capture.debounce_window_ms == 0 {
            return Err(Error::Config(
                "debounce window must be greater than 0".to_string(),
            ));
        }
        if self.capture.output_size == 0 {
            return Err(Error::Config(
                "capture output size must be greater than 0".to_string(),
            ));
        }
        if !(1..=100).contains(&self.capture.jpeg_quality) {
            return Err(Error::Config(
                "JPEG quality must be between 1 and 100".to_string(),
            ));
        }

        if self.scheduler.tick_period_ms == 0 {
            return Err(Error::Config(
                "tick period must be greater than 0".to_string(),
            ));
        }

        if self.enrollment.directions.is_empty() {
            return Err(Error::Config(
                "enrollment requires at least one direction".to_string(),
            ));
        }
        if self.enrollment.captures_per_direction == 0 {
            return Err(Error::Config(
                "captures per direction must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Face enrollment pipeline configuration

# Pose estimation
pose:
  mirrored: false

# Direction classifier thresholds
classifier:
  yaw_threshold: 12.0
  pitch_threshold: 10.0
  pitch_upper_bound: 90.0
  pitch_lower_bound: 140.0

# Capture and debounce
capture:
  debounce_window_ms: 100
  output_size: 224
  crop_inset_px: 50
  jpeg_quality: 100

# Scheduler
scheduler:
  tick_period_ms: 100

# Storage collaborator
storage:
  mode: disk
  output_dir: "captures"
  endpoint: "http://127.0.0.1:8000/api/save-image"

# Enrollment plan
enrollment:
  directions: [straight, left, right, up, down]
  captures_per_direction: 5
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        config.validate().unwrap();
        assert_eq!(config.capture.debounce_window_ms, 100);
        assert_eq!(config.enrollment.directions.len(), 5);
        assert_eq!(config.storage.mode, StorageMode::Disk);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = Config::default();
        config.capture.debounce_window_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.capture.jpeg_quality = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.classifier.pitch_upper_bound = 150.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.enrollment.directions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = Config::default();
        config.pose.mirrored = true;
        config.capture.crop_inset_px = 0;
        config.to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert!(loaded.pose.mirrored);
        assert_eq!(loaded.capture.crop_inset_px, 0);
    }
}
