//! Risk record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::RiskId;

/// A discrete rating on the 1-5 scale used for likelihood and impact.
///
/// Values outside the scale are unrepresentable; inputs are closed-choice
/// selects, so construction failures only arise from programmatic use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating on the scale
    pub const MIN: u8 = 1;

    /// Highest rating on the scale
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting values outside [1,5]
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange(value))
        }
    }

    /// Get the raw value
    pub fn get(self) -> u8 {
        self.0
    }

    /// The full scale in ascending order, for closed-choice prompts
    pub fn scale() -> [Rating; 5] {
        [Rating(1), Rating(2), Rating(3), Rating(4), Rating(5)]
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating(3)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

/// Errors from constructing a rating
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("rating must be between 1 and 5, got {0}")]
    OutOfRange(u8),
}

/// The user-supplied payload of an add or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskDraft {
    /// Risk description (trimmed before storage; must not be empty)
    pub description: String,

    /// Likelihood rating (1-5)
    pub likelihood: Rating,

    /// Impact rating (1-5)
    pub impact: Rating,
}

impl RiskDraft {
    pub fn new(description: impl Into<String>, likelihood: Rating, impact: Rating) -> Self {
        Self {
            description: description.into(),
            likelihood,
            impact,
        }
    }
}

/// A recorded risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Risk {
    /// Stable identifier, assigned at creation and preserved across edits
    pub id: RiskId,

    /// Risk description
    pub description: String,

    /// Likelihood rating (1-5)
    pub likelihood: Rating,

    /// Impact rating (1-5)
    pub impact: Rating,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Risk {
    /// Create a new risk from a draft. The description is stored trimmed.
    pub fn new(draft: RiskDraft) -> Self {
        Self {
            id: RiskId::new(),
            description: draft.description.trim().to_string(),
            likelihood: draft.likelihood,
            impact: draft.impact,
            created: Utc::now(),
        }
    }

    /// Replace the user-editable fields, keeping id and creation time
    pub fn apply(&mut self, draft: RiskDraft) {
        self.description = draft.description.trim().to_string();
        self.likelihood = draft.likelihood;
        self.impact = draft.impact;
    }
}
