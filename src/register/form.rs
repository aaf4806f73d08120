//! The risk entry form and its two-mode state machine

use crate::core::identity::RiskId;
use crate::register::risk::{Rating, RiskDraft};
use crate::register::store::{Register, RegisterError};

/// Form mode: adding a new risk, or editing a remembered one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Idle,
    Editing(RiskId),
}

/// Outcome of a successful submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(RiskId),
    Updated(RiskId),
}

/// The risk entry form.
///
/// Holds the in-progress field values and the Idle/Editing mode. A failed
/// submit (empty description) changes neither fields nor mode; a successful
/// one clears the description, keeps the rating selections, and returns the
/// form to `Idle`.
#[derive(Debug, Default)]
pub struct EntryForm {
    pub description: String,
    pub likelihood: Rating,
    pub impact: Rating,
    mode: FormMode,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    /// Label for the primary action, tracking the form mode
    pub fn action_label(&self) -> &'static str {
        match self.mode {
            FormMode::Idle => "Add Risk",
            FormMode::Editing(_) => "Save Changes",
        }
    }

    /// Load a record into the form and switch to editing mode
    pub fn begin_edit(&mut self, register: &Register, id: RiskId) -> Result<(), RegisterError> {
        let risk = register.get(id).ok_or(RegisterError::UnknownId(id))?;
        self.description = risk.description.clone();
        self.likelihood = risk.likelihood;
        self.impact = risk.impact;
        self.mode = FormMode::Editing(id);
        Ok(())
    }

    /// Abandon an in-progress edit and return to adding
    pub fn cancel_edit(&mut self) {
        self.description.clear();
        self.mode = FormMode::Idle;
    }

    /// Single entry point for the primary action: update the remembered
    /// record when editing, append a new one otherwise.
    pub fn submit(&mut self, register: &mut Register) -> Result<SubmitOutcome, RegisterError> {
        let draft = RiskDraft::new(self.description.clone(), self.likelihood, self.impact);

        let outcome = match self.mode {
            FormMode::Editing(id) => {
                register.update(id, draft)?;
                SubmitOutcome::Updated(id)
            }
            FormMode::Idle => SubmitOutcome::Added(register.add(draft)?.id),
        };

        self.description.clear();
        self.mode = FormMode::Idle;
        Ok(outcome)
    }
}
