//! Single-face precondition for the capture pipeline.
//!
//! Enrollment data quality requires that a capture never fires while zero or
//! more than one face is visible; both are normal states communicated through
//! feedback text, not errors.

use crate::detection::{DetectionFrame, Face};

/// Outcome of the single-face check for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuardResult<'a> {
    /// Exactly one face: downstream stages run
    Proceed(&'a Face),
    /// Zero faces: only feedback text updates this tick
    NoFace,
    /// Two or more faces: pose and capture are suppressed this tick
    MultipleFaces,
}

/// Validate that exactly one face is present before pose/capture logic runs
#[must_use]
pub fn guard(frame: &DetectionFrame) -> GuardResult<'_> {
    match frame.faces.as_slice() {
        [] => GuardResult::NoFace,
        [face] => GuardResult::Proceed(face),
        _ => GuardResult::MultipleFaces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_face() {
        let frame = DetectionFrame::default();
        assert_eq!(guard(&frame), GuardResult::NoFace);
    }

    #[test]
    fn test_single_face_proceeds() {
        let frame = DetectionFrame::new(vec![Face::default()]);
        assert!(matches!(guard(&frame), GuardResult::Proceed(_)));
    }

    #[test]
    fn test_multiple_faces() {
        let frame = DetectionFrame::new(vec![Face::default(), Face::default()]);
        assert_eq!(guard(&frame), GuardResult::MultipleFaces);

        let frame = DetectionFrame::new(vec![Face::default(); 5]);
        assert_eq!(guard(&frame), GuardResult::MultipleFaces);
    }
}
