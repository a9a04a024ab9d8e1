//! Replay detector for offline runs.
//!
//! A replay file holds one JSON-encoded `DetectionFrame` per line; the
//! detector serves them in order, one per tick, and reports empty frames once
//! exhausted. Together with a synthetic video source this drives the full
//! pipeline without a camera or a neural detector.

use crate::{
    detection::{DetectionFrame, FaceDetector},
    video::VideoFrame,
    Error, Result,
};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Detector serving pre-recorded detection frames
#[derive(Debug, Clone)]
pub struct ReplayDetector {
    frames: VecDeque<DetectionFrame>,
}

impl ReplayDetector {
    /// Load a replay from a JSONL file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line fails to parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        let mut frames = VecDeque::new();

        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let frame: DetectionFrame = serde_json::from_str(&line).map_err(|e| {
                Error::Replay(format!(
                    "{} line {}: {e}",
                    path.as_ref().display(),
                    index + 1
                ))
            })?;
            frames.push_back(frame);
        }

        log::info!("loaded replay with {} detection frames", frames.len());
        Ok(Self { frames })
    }

    /// Build a replay from in-memory frames (used by tests)
    #[must_use]
    pub fn from_frames(frames: Vec<DetectionFrame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Frames not yet served
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FaceDetector for ReplayDetector {
    async fn detect(&mut self, _frame: &VideoFrame) -> Result<DetectionFrame> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{BoundingBox, Face, LandmarkSet, Point2};
    use std::io::Write;

    fn sample_frame() -> DetectionFrame {
        DetectionFrame::new(vec![Face {
            bbox: BoundingBox::new(10.0, 10.0, 100.0, 100.0),
            landmarks: LandmarkSet {
                nose: vec![Point2::new(60.0, 60.0); 7],
                left_eye: vec![Point2::new(40.0, 40.0); 4],
                right_eye: vec![Point2::new(80.0, 40.0); 4],
            },
        }])
    }

    #[tokio::test]
    async fn test_replay_serves_frames_in_order() {
        use crate::video::VideoSource;

        let mut detector =
            ReplayDetector::from_frames(vec![sample_frame(), DetectionFrame::default()]);
        let frame = crate::video::SyntheticSource::new(320, 240).frame().unwrap();

        let first = detector.detect(&frame).await.unwrap();
        assert_eq!(first.faces.len(), 1);
        let second = detector.detect(&frame).await.unwrap();
        assert!(second.faces.is_empty());

        // Exhausted replay keeps serving empty frames
        let third = detector.detect(&frame).await.unwrap();
        assert!(third.faces.is_empty());
        assert_eq!(detector.remaining(), 0);
    }

    #[test]
    fn test_replay_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.jsonl");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "{}", serde_json::to_string(&sample_frame()).unwrap()).unwrap();
        writeln!(file).unwrap();
        writeln!(
            file,
            "{}",
            serde_json::to_string(&DetectionFrame::default()).unwrap()
        )
        .unwrap();

        let detector = ReplayDetector::from_file(&path).unwrap();
        assert_eq!(detector.remaining(), 2);
    }

    #[test]
    fn test_replay_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.jsonl");
        std::fs::write(&path, "not json\n").unwrap();

        assert!(matches!(
            ReplayDetector::from_file(&path),
            Err(Error::Replay(_))
        ));
    }
}
