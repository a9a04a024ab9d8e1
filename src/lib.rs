//! Face enrollment capture pipeline.
//!
//! This library implements the per-frame core of a webcam identity-enrollment
//! flow: facial landmark sets from an external detector are turned into head
//! pose estimates, classified into discrete direction labels, and — when the
//! observed direction matches the pose the enrollment flow currently wants —
//! cropped, encoded, and handed to a storage collaborator under a hard
//! debounce rate limit.
//!
//! The pipeline per tick:
//! 1. Single-face guard: zero or multiple faces only update feedback text
//! 2. Pose estimation from the nose/eye landmark geometry
//! 3. Prioritized threshold classification into one of five directions
//! 4. Debounced capture decision and fire-and-forget submission
//!
//! # Examples
//!
//! ## Classifying a pose
//!
//! ```
//! use face_enroll::direction::{Direction, DirectionClassifier};
//! use face_enroll::pose_estimation::Pose;
//!
//! let classifier = DirectionClassifier::default();
//! assert_eq!(classifier.classify(Pose::new(20.0, 5.0)), Direction::Left);
//! assert_eq!(classifier.classify(Pose::new(0.0, 0.0)), Direction::Straight);
//! ```
//!
//! ## Running a replay session
//!
//! ```no_run
//! use face_enroll::{
//!     config::Config,
//!     enrollment::EnrollmentPlan,
//!     replay::ReplayDetector,
//!     scheduler::FrameScheduler,
//!     storage::DiskSink,
//!     video::SyntheticSource,
//! };
//! use tokio::sync::watch;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let detector = ReplayDetector::from_file("session.jsonl")?;
//! let video = SyntheticSource::new(720, 560);
//! let storage = DiskSink::new("captures")?;
//!
//! let mut scheduler = FrameScheduler::new(
//!     detector,
//!     video,
//!     storage,
//!     &config,
//!     EnrollmentPlan::default(),
//! );
//!
//! let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//! scheduler.run(shutdown_rx).await?;
//! # Ok(())
//! # }
//! ```

/// Landmark, bounding box, and detection frame types plus the detector trait
pub mod detection;

/// Head pose estimation from facial landmarks
pub mod pose_estimation;

/// Discrete direction labels and the prioritized threshold classifier
pub mod direction;

/// Single-face precondition check
pub mod guard;

/// Debounced capture decisions and image encoding
pub mod capture;

/// Enrollment target progression
pub mod enrollment;

/// Storage collaborator sinks
pub mod storage;

/// Video source collaborator
pub mod video;

/// Fixed-cadence frame scheduler
pub mod scheduler;

/// Replay detector for offline runs
pub mod replay;

/// Error types and result handling
pub mod error;

/// Constants used throughout the pipeline
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
