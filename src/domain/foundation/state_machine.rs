//! Transition rules shared by status enums.
//!
//! `FormStatus` (publication) and `SubmissionStatus` (triage) list their
//! allowed targets; `transition_to` turns a disallowed move into an
//! `InvalidStateTransition` error.

use super::{DomainError, ErrorCode};

/// A status enum with a fixed set of allowed moves.
///
/// ```ignore
/// let next = FormStatus::Draft.transition_to(FormStatus::Published)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Statuses reachable from `self` in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// # Errors
    ///
    /// - `InvalidStateTransition` when `target` is not reachable from `self`
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if !self.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("{:?} cannot move to {:?}", self, target),
            ));
        }
        Ok(target)
    }

    /// No status is reachable from here.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
