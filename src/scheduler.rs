//! Fixed-cadence frame scheduler driving the capture pipeline.
//!
//! One async task owns the whole detect → guard → estimate → classify →
//! debounce sequence. Each tick is awaited to completion before the interval
//! is polled again, so ticks are serialized by construction and never race on
//! the session's capture state; delayed ticks are coalesced
//! (`MissedTickBehavior::Skip`) rather than queued up.

use crate::{
    capture::{CaptureDebouncer, CaptureDecision},
    config::Config,
    detection::{BoundingBox, FaceDetector},
    direction::{Direction, DirectionClassifier},
    enrollment::{EnrollmentPlan, EnrollmentSession},
    guard::{guard, GuardResult},
    pose_estimation::{Pose, PoseEstimator},
    storage::StorageSink,
    video::VideoSource,
    Error, Result,
};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

/// Feedback text shown to the user, one state per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStatus {
    /// Zero faces in the frame
    NoFace,
    /// Two or more faces in the frame
    MultipleFaces,
    /// Exactly one face, looking in the given direction
    Looking(Direction),
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackStatus::NoFace => f.write_str("No face detected"),
            FeedbackStatus::MultipleFaces => f.write_str("Multiple faces detected"),
            FeedbackStatus::Looking(direction) => write!(f, "Looking: {direction}"),
        }
    }
}

/// Per-tick overlay data: status text, bounding box, numeric pose
#[derive(Debug, Clone, PartialEq)]
pub struct TickFeedback {
    pub status: FeedbackStatus,
    pub bbox: Option<BoundingBox>,
    pub pose: Option<Pose>,
    pub direction: Option<Direction>,
    /// Direction the enrollment flow currently wants held
    pub target: Option<Direction>,
}

impl Default for TickFeedback {
    fn default() -> Self {
        Self {
            status: FeedbackStatus::NoFace,
            bbox: None,
            pose: None,
            direction: None,
            target: None,
        }
    }
}

/// Drives the pipeline at a fixed period against a live video source
pub struct FrameScheduler<D, V, S> {
    detector: D,
    video: V,
    storage: S,
    estimator: PoseEstimator,
    classifier: DirectionClassifier,
    debouncer: CaptureDebouncer,
    session: EnrollmentSession,
    tick_period: Duration,
    feedback: watch::Sender<TickFeedback>,
    captures_submitted: u32,
}

impl<D, V, S> FrameScheduler<D, V, S>
where
    D: FaceDetector,
    V: VideoSource,
    S: StorageSink,
{
    /// Wire the pipeline stages together for one enrollment session
    pub fn new(detector: D, video: V, storage: S, config: &Config, plan: EnrollmentPlan) -> Self {
        let (feedback, _) = watch::channel(TickFeedback::default());
        Self {
            detector,
            video,
            storage,
            estimator: PoseEstimator::new(config.pose.mirrored),
            classifier: DirectionClassifier::from_config(&config.classifier),
            debouncer: CaptureDebouncer::from_config(&config.capture),
            session: EnrollmentSession::new(plan, config.capture.debounce_window_ms),
            tick_period: Duration::from_millis(config.scheduler.tick_period_ms),
            feedback,
            captures_submitted: 0,
        }
    }

    /// Subscribe to per-tick overlay feedback
    #[must_use]
    pub fn feedback(&self) -> watch::Receiver<TickFeedback> {
        self.feedback.subscribe()
    }

    #[must_use]
    pub fn session(&self) -> &EnrollmentSession {
        &self.session
    }

    /// Captures accepted and handed to the storage sink so far
    #[must_use]
    pub fn captures_submitted(&self) -> u32 {
        self.captures_submitted
    }

    /// Run the tick loop until the enrollment plan completes or the shutdown
    /// signal fires.
    ///
    /// Shutdown is observed only between ticks: an in-flight detection,
    /// decision, or submission always runs to completion, so teardown never
    /// leaves a dangling submission.
    ///
    /// # Errors
    ///
    /// Individual tick failures (detector errors, indeterminate poses,
    /// contract violations) are logged and skipped; only construction-level
    /// failures surface here.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        log::info!(
            "frame scheduler started: period {:?}, first target {}",
            self.tick_period,
            self.session.target()
        );

        let started = Instant::now();
        let epoch_start_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        let mut interval = tokio::time::interval(self.tick_period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    log::info!("session teardown requested");
                    break;
                }
                _ = interval.tick() => {
                    let now_ms = epoch_start_ms + started.elapsed().as_millis() as u64;
                    match self.tick(now_ms).await {
                        Ok(()) => {}
                        Err(Error::IndeterminatePose) => {
                            log::debug!("pose indeterminate, tick suppressed");
                        }
                        Err(e) => {
                            log::warn!("tick skipped: {e}");
                        }
                    }
                    if self.session.is_complete() {
                        log::info!(
                            "enrollment complete after {} captures",
                            self.captures_submitted
                        );
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// One pass of the pipeline: detect, guard, estimate, classify, debounce
    async fn tick(&mut self, now_ms: u64) -> Result<()> {
        let frame = self.video.frame()?;
        let detection = self.detector.detect(&frame).await?;

        let face = match guard(&detection) {
            GuardResult::NoFace => {
                self.publish(TickFeedback {
                    status: FeedbackStatus::NoFace,
                    target: Some(self.session.target()),
                    ..TickFeedback::default()
                });
                return Ok(());
            }
            GuardResult::MultipleFaces => {
                self.publish(TickFeedback {
                    status: FeedbackStatus::MultipleFaces,
                    target: Some(self.session.target()),
                    ..TickFeedback::default()
                });
                return Ok(());
            }
            GuardResult::Proceed(face) => face,
        };

        let pose = self.estimator.estimate(&face.landmarks)?;
        let direction = self.classifier.classify(pose);

        self.publish(TickFeedback {
            status: FeedbackStatus::Looking(direction),
            bbox: Some(face.bbox),
            pose: Some(pose),
            direction: Some(direction),
            target: Some(self.session.target()),
        });

        let decision =
            self.debouncer
                .on_tick(face, &frame, direction, now_ms, self.session.state_mut())?;

        if let CaptureDecision::Capture(image) = decision {
            self.session.note_capture();
            self.captures_submitted += 1;
            // Fire-and-forget: a failed submission is logged and not retried
            // within the debounce window
            if let Err(e) = self.storage.submit(&image).await {
                log::warn!("failed to store capture {}: {e}", image.filename);
            }
        }

        Ok(())
    }

    fn publish(&self, feedback: TickFeedback) {
        // Receivers may come and go; send_replace never fails
        self.feedback.send_replace(feedback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_status_display() {
        assert_eq!(FeedbackStatus::NoFace.to_string(), "No face detected");
        assert_eq!(
            FeedbackStatus::MultipleFaces.to_string(),
            "Multiple faces detected"
        );
        assert_eq!(
            FeedbackStatus::Looking(Direction::Left).to_string(),
            "Looking: Left"
        );
    }

    #[test]
    fn test_default_feedback_is_no_face() {
        let feedback = TickFeedback::default();
        assert_eq!(feedback.status, FeedbackStatus::NoFace);
        assert!(feedback.bbox.is_none());
        assert!(feedback.pose.is_none());
    }
}
