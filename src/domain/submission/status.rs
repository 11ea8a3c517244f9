//! SubmissionStatus enum for owner triage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Triage state of a submission. Independent of the form's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    New,
    Reviewed,
    Archived,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 3] = [
        SubmissionStatus::New,
        SubmissionStatus::Reviewed,
        SubmissionStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Reviewed => "reviewed",
            SubmissionStatus::Archived => "archived",
        }
    }
}

/// Owners may move a submission between any two distinct states.
impl StateMachine for SubmissionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self != target
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Self::ALL.into_iter().filter(|s| s != self).collect()
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(SubmissionStatus::New),
            "reviewed" => Ok(SubmissionStatus::Reviewed),
            "archived" => Ok(SubmissionStatus::Archived),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown submission status '{}'", other),
            )),
        }
    }
}
