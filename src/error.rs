//! Error types for the face enrollment pipeline.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Pose estimation produced a non-finite result (degenerate landmark
    /// geometry: zero eye distance or zero nose height)
    #[error("indeterminate pose: degenerate landmark geometry")]
    IndeterminatePose,

    /// The detector delivered a landmark set that violates its contract
    /// (too few nose points, empty eye ring)
    #[error("detector contract violation: {0}")]
    DetectorContract(String),

    /// Invalid input parameters provided
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Image processing operation failed
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External detector call failed
    #[error("detection error: {0}")]
    Detection(String),

    /// Capture submission to the storage collaborator failed
    #[error("storage error: {0}")]
    Storage(String),

    /// Replay file could not be read or parsed
    #[error("replay error: {0}")]
    Replay(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
