//! Report generation - CSV register export and heatmap aggregation

pub mod grid;
pub mod heatmap;

pub use grid::HeatGrid;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::register::store::Register;

/// Fallback used when the organization name is blank
pub const DEFAULT_ORGANIZATION: &str = "Organization";

/// Result of a successful generate: the written register and its grid
#[derive(Debug)]
pub struct Report {
    /// Path of the written CSV register
    pub path: PathBuf,

    /// Aggregation grid for the heatmap
    pub grid: HeatGrid,

    /// Organization name after the blank fallback
    pub organization: String,
}

/// Errors from report generation
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no risks recorded. Add at least one risk before generating the report")]
    EmptyRegister,

    #[error("failed to write register: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write register: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve a user-supplied organization name, falling back when blank
pub fn resolve_organization(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_ORGANIZATION
    } else {
        trimmed
    }
}

/// Filename of the CSV register for an organization
pub fn register_filename(organization: &str) -> String {
    format!("{}_risk_register.csv", organization)
}

/// Write the CSV register and build the aggregation grid.
///
/// Fails before any file write when the register is empty. An existing
/// register file of the same name is overwritten.
pub fn generate(
    organization: &str,
    register: &Register,
    report_dir: &Path,
) -> Result<Report, ReportError> {
    if register.is_empty() {
        return Err(ReportError::EmptyRegister);
    }

    let organization = resolve_organization(organization);
    let path = report_dir.join(register_filename(organization));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["Description", "Likelihood", "Impact"])?;
    for risk in register.iter() {
        let likelihood = risk.likelihood.to_string();
        let impact = risk.impact.to_string();
        writer.write_record([risk.description.as_str(), likelihood.as_str(), impact.as_str()])?;
    }
    writer.flush()?;

    Ok(Report {
        path,
        grid: HeatGrid::build(register.risks()),
        organization: organization.to_string(),
    })
}
