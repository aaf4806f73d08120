//! The displayed register table
//!
//! A derived view of the risk store: one row per record, same order. The
//! session mutates store and table together so the two never diverge.

use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::truncate_str;
use crate::core::identity::RiskId;
use crate::register::risk::Risk;

/// Maximum width of the description column before truncation
const DESCRIPTION_WIDTH: usize = 40;

/// One displayed row, mirroring a stored record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskRow {
    /// Identity of the mirrored record (not displayed)
    pub id: RiskId,
    pub description: String,
    pub likelihood: String,
    pub impact: String,
}

impl RiskRow {
    fn from_risk(risk: &Risk) -> Self {
        Self {
            id: risk.id,
            description: risk.description.clone(),
            likelihood: risk.likelihood.to_string(),
            impact: risk.impact.to_string(),
        }
    }
}

/// The displayed ordered row list, kept structurally parallel to the store
#[derive(Debug, Default)]
pub struct RiskTable {
    rows: Vec<RiskRow>,
}

impl RiskTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the row for a newly added record
    pub fn push(&mut self, risk: &Risk) {
        self.rows.push(RiskRow::from_risk(risk));
    }

    /// Replace the row at a position after its record was updated.
    /// The position must exist; the session only calls this after the
    /// store accepted the matching update.
    pub fn update(&mut self, position: usize, risk: &Risk) {
        self.rows[position] = RiskRow::from_risk(risk);
    }

    /// Remove the row at a position after its record was removed
    pub fn remove(&mut self, position: usize) -> RiskRow {
        self.rows.remove(position)
    }

    pub fn rows(&self) -> &[RiskRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One-line labels for the row picker, 1-based like the table
    pub fn labels(&self) -> Vec<String> {
        self.rows
            .iter()
            .enumerate()
            .map(|(position, row)| {
                format!(
                    "{}. {} (L{}, I{})",
                    position + 1,
                    truncate_str(&row.description, DESCRIPTION_WIDTH),
                    row.likelihood,
                    row.impact
                )
            })
            .collect()
    }

    /// Render the table for display
    pub fn render(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["#", "Description", "Likelihood", "Impact"]);

        for (position, row) in self.rows.iter().enumerate() {
            builder.push_record([
                &(position + 1).to_string(),
                &truncate_str(&row.description, DESCRIPTION_WIDTH),
                &row.likelihood,
                &row.impact,
            ]);
        }

        builder.build().with(Style::rounded()).to_string()
    }
}
