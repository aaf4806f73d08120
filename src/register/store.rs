//! The in-memory risk store

use thiserror::Error;

use crate::core::identity::RiskId;
use crate::register::risk::{Risk, RiskDraft};

/// An ordered, in-memory collection of risk records.
///
/// Mutations validate before touching the collection, so a failed
/// operation never leaves partial state behind.
#[derive(Debug, Default)]
pub struct Register {
    risks: Vec<Risk>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new risk. Fails without state change if the description
    /// is empty after trimming.
    pub fn add(&mut self, draft: RiskDraft) -> Result<&Risk, RegisterError> {
        Self::validate(&draft)?;
        self.risks.push(Risk::new(draft));
        Ok(&self.risks[self.risks.len() - 1])
    }

    /// Replace the editable fields of an existing risk in place.
    pub fn update(&mut self, id: RiskId, draft: RiskDraft) -> Result<&Risk, RegisterError> {
        Self::validate(&draft)?;
        let position = self
            .position_of(id)
            .ok_or(RegisterError::UnknownId(id))?;
        self.risks[position].apply(draft);
        Ok(&self.risks[position])
    }

    /// Remove a risk, returning it. Relative order of the rest is kept.
    pub fn remove(&mut self, id: RiskId) -> Result<Risk, RegisterError> {
        let position = self
            .position_of(id)
            .ok_or(RegisterError::UnknownId(id))?;
        Ok(self.risks.remove(position))
    }

    /// Get a risk by id
    pub fn get(&self, id: RiskId) -> Option<&Risk> {
        self.risks.iter().find(|r| r.id == id)
    }

    /// Resolve an id to its current position in the collection
    pub fn position_of(&self, id: RiskId) -> Option<usize> {
        self.risks.iter().position(|r| r.id == id)
    }

    /// Get the risk at a position (the displayed row order)
    pub fn risk_at(&self, position: usize) -> Option<&Risk> {
        self.risks.get(position)
    }

    /// Iterate all risks in collection order
    pub fn iter(&self) -> impl Iterator<Item = &Risk> {
        self.risks.iter()
    }

    /// All risks in collection order
    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }

    pub fn len(&self) -> usize {
        self.risks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }

    fn validate(draft: &RiskDraft) -> Result<(), RegisterError> {
        if draft.description.trim().is_empty() {
            return Err(RegisterError::EmptyDescription);
        }
        Ok(())
    }
}

/// Errors from register mutations
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("risk description cannot be empty")]
    EmptyDescription,

    #[error("no risk with id {0}")]
    UnknownId(RiskId),

    #[error("no risk at position {0}")]
    NoSuchPosition(usize),
}
