//! Enrollment flow collaborator: target direction progression.
//!
//! The flow supplies the sequence of poses the user must hold and how many
//! captures each pose needs. The session owns the capture state, advances to
//! the next target when a step has enough captures, and reports completion.

use crate::{
    capture::CaptureState,
    constants::DEFAULT_CAPTURES_PER_DIRECTION,
    direction::Direction,
    Error, Result,
};

/// One step of the enrollment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentStep {
    /// Pose label the user must hold
    pub target: Direction,
    /// Captures required before advancing
    pub captures: u32,
}

/// Ordered sequence of enrollment steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentPlan {
    steps: Vec<EnrollmentStep>,
}

impl EnrollmentPlan {
    /// Create a plan from explicit steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan is empty or any step requires zero
    /// captures.
    pub fn new(steps: Vec<EnrollmentStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::InvalidInput("enrollment plan is empty".to_string()));
        }
        if steps.iter().any(|s| s.captures == 0) {
            return Err(Error::InvalidInput(
                "enrollment step requires at least one capture".to_string(),
            ));
        }
        Ok(Self { steps })
    }

    /// Plan with the same capture count for each direction
    pub fn uniform(directions: &[Direction], captures: u32) -> Result<Self> {
        Self::new(
            directions
                .iter()
                .map(|&target| EnrollmentStep { target, captures })
                .collect(),
        )
    }

    #[must_use]
    pub fn steps(&self) -> &[EnrollmentStep] {
        &self.steps
    }

    /// Total captures the plan requires
    #[must_use]
    pub fn total_captures(&self) -> u32 {
        self.steps.iter().map(|s| s.captures).sum()
    }
}

impl Default for EnrollmentPlan {
    /// Straight, then Left, Right, Up, Down
    fn default() -> Self {
        let steps = [
            Direction::Straight,
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ]
        .into_iter()
        .map(|target| EnrollmentStep {
            target,
            captures: DEFAULT_CAPTURES_PER_DIRECTION,
        })
        .collect();
        Self { steps }
    }
}

/// Live enrollment session: plan progress plus the capture state
#[derive(Debug, Clone)]
pub struct EnrollmentSession {
    plan: EnrollmentPlan,
    step_index: usize,
    state: CaptureState,
    complete: bool,
}

impl EnrollmentSession {
    #[must_use]
    pub fn new(plan: EnrollmentPlan, debounce_window_ms: u64) -> Self {
        let first_target = plan.steps[0].target;
        Self {
            plan,
            step_index: 0,
            state: CaptureState::new(first_target, debounce_window_ms),
            complete: false,
        }
    }

    /// Direction the flow currently wants captured
    #[must_use]
    pub fn target(&self) -> Direction {
        self.state.target
    }

    /// Capture state for the debouncer to mutate
    pub fn state_mut(&mut self) -> &mut CaptureState {
        &mut self.state
    }

    /// Zero-based index of the current step
    #[must_use]
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Matches recorded toward the current step
    #[must_use]
    pub fn match_count(&self) -> u32 {
        self.state.match_count
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Consume progress after an accepted capture, advancing the target when
    /// the current step has enough captures.
    pub fn note_capture(&mut self) {
        if self.complete {
            return;
        }
        let needed = self.plan.steps[self.step_index].captures;
        if self.state.match_count < needed {
            return;
        }

        self.step_index += 1;
        match self.plan.steps.get(self.step_index) {
            Some(step) => {
                log::info!("enrollment advanced to {}", step.target);
                self.state.retarget(step.target);
            }
            None => {
                log::info!("enrollment plan complete");
                self.complete = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan_rejected() {
        assert!(EnrollmentPlan::new(Vec::new()).is_err());
        assert!(EnrollmentPlan::uniform(&[Direction::Up], 0).is_err());
    }

    #[test]
    fn test_default_plan() {
        let plan = EnrollmentPlan::default();
        assert_eq!(plan.steps().len(), 5);
        assert_eq!(plan.steps()[0].target, Direction::Straight);
        assert_eq!(plan.total_captures(), 25);
    }

    #[test]
    fn test_session_advances_and_completes() {
        let plan = EnrollmentPlan::uniform(&[Direction::Straight, Direction::Left], 2).unwrap();
        let mut session = EnrollmentSession::new(plan, 100);
        assert_eq!(session.target(), Direction::Straight);

        // Simulate what the debouncer does on accepted captures
        session.state_mut().match_count = 1;
        session.note_capture();
        assert_eq!(session.target(), Direction::Straight);

        session.state_mut().match_count = 2;
        session.state_mut().last_capture_ms = Some(200);
        session.note_capture();
        assert_eq!(session.target(), Direction::Left);
        assert_eq!(session.match_count(), 0);
        // Debounce anchor survives the advance
        assert_eq!(session.state_mut().last_capture_ms, Some(200));
        assert!(!session.is_complete());

        session.state_mut().match_count = 2;
        session.note_capture();
        assert!(session.is_complete());
    }
}
