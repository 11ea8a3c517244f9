//! FormStatus enum for the publication lifecycle of a form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Publication status of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Draft,
    Published,
    Unpublished,
}

impl FormStatus {
    /// Returns true if submissions may be recorded against the form.
    pub fn accepts_submissions(&self) -> bool {
        matches!(self, FormStatus::Published)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::Draft => "draft",
            FormStatus::Published => "published",
            FormStatus::Unpublished => "unpublished",
        }
    }
}

impl StateMachine for FormStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FormStatus::*;
        matches!(
            (self, target),
            (Draft, Published) | (Published, Unpublished) | (Unpublished, Published)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FormStatus::*;
        match self {
            Draft => vec![Published],
            Published => vec![Unpublished],
            Unpublished => vec![Published],
        }
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(FormStatus::Draft),
            "published" => Ok(FormStatus::Published),
            "unpublished" => Ok(FormStatus::Unpublished),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown form status '{}'", other),
            )),
        }
    }
}
