//! The interactive register session
//!
//! `Session` is the interaction handler: it owns the store, the displayed
//! table, the entry form, and the organization name, and every mutation
//! goes through it so store and table stay in lockstep. `run` drives the
//! prompt loop on top of it.

use console::style;
use dialoguer::{Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::truncate_str;
use crate::cli::table::RiskTable;
use crate::register::form::{EntryForm, SubmitOutcome};
use crate::register::risk::{Rating, Risk};
use crate::register::store::{Register, RegisterError};
use crate::report::{self, heatmap, Report, ReportError};

pub struct Session {
    register: Register,
    table: RiskTable,
    form: EntryForm,
    organization: String,
    report_dir: PathBuf,
}

impl Session {
    pub fn new(organization: String, report_dir: PathBuf) -> Self {
        Self {
            register: Register::new(),
            table: RiskTable::new(),
            form: EntryForm::new(),
            organization,
            report_dir,
        }
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn table(&self) -> &RiskTable {
        &self.table
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn set_organization(&mut self, name: String) {
        self.organization = name;
    }

    /// Submit the entry form (add or save) and mirror the result into the
    /// displayed table.
    pub fn submit_entry(&mut self) -> std::result::Result<SubmitOutcome, RegisterError> {
        let outcome = self.form.submit(&mut self.register)?;

        let (id, added) = match outcome {
            SubmitOutcome::Added(id) => (id, true),
            SubmitOutcome::Updated(id) => (id, false),
        };
        let position = self
            .register
            .position_of(id)
            .ok_or(RegisterError::UnknownId(id))?;
        let risk = &self.register.risks()[position];

        if added {
            self.table.push(risk);
        } else {
            self.table.update(position, risk);
        }
        Ok(outcome)
    }

    /// Load the record at a displayed position into the entry form
    pub fn begin_edit(&mut self, position: usize) -> std::result::Result<(), RegisterError> {
        let id = self
            .register
            .risk_at(position)
            .map(|r| r.id)
            .ok_or(RegisterError::NoSuchPosition(position))?;
        self.form.begin_edit(&self.register, id)
    }

    /// Delete the record at a displayed position from store and table
    pub fn delete(&mut self, position: usize) -> std::result::Result<Risk, RegisterError> {
        let id = self
            .register
            .risk_at(position)
            .map(|r| r.id)
            .ok_or(RegisterError::NoSuchPosition(position))?;
        let removed = self.register.remove(id)?;
        self.table.remove(position);
        Ok(removed)
    }

    /// Write the CSV register and build the heatmap grid
    pub fn generate(&self) -> std::result::Result<Report, ReportError> {
        report::generate(&self.organization, &self.register, &self.report_dir)
    }

    /// Drive the interactive prompt loop until the user quits
    pub fn run(&mut self) -> Result<()> {
        println!();
        println!("{}", style("Risk Register").bold());
        println!("{}", style("─".repeat(50)).dim());

        loop {
            println!();
            self.print_status();

            let organization_item = if self.organization.trim().is_empty() {
                "Set organization name".to_string()
            } else {
                format!("Set organization name (currently: {})", self.organization)
            };

            let items = [
                self.form.action_label().to_string(),
                "Edit a risk".to_string(),
                "Delete a risk".to_string(),
                organization_item,
                "Generate register & heatmap".to_string(),
                "Quit".to_string(),
            ];

            let choice = Select::new()
                .with_prompt("Action")
                .items(&items)
                .default(0)
                .interact()
                .into_diagnostic()?;

            match choice {
                0 => self.prompt_entry()?,
                1 => self.prompt_edit()?,
                2 => self.prompt_delete()?,
                3 => self.prompt_organization()?,
                4 => self.run_generate()?,
                _ => break,
            }
        }

        Ok(())
    }

    fn print_status(&self) {
        if self.table.is_empty() {
            println!("{}", style("No risks recorded yet.").dim());
        } else {
            println!("{}", self.table.render());
            println!(
                "{} risk(s) recorded.",
                style(self.table.len()).cyan()
            );
        }
    }

    /// Prompt for the entry fields and run the primary add/save action
    fn prompt_entry(&mut self) -> Result<()> {
        let mut input = Input::<String>::new()
            .with_prompt("Risk description")
            .allow_empty(true);
        if !self.form.description.is_empty() {
            input = input.default(self.form.description.clone());
        }
        let description = input.interact_text().into_diagnostic()?;

        let likelihood = self.prompt_rating("Likelihood (1-5)", self.form.likelihood)?;
        let impact = self.prompt_rating("Impact (1-5)", self.form.impact)?;

        self.form.description = description;
        self.form.likelihood = likelihood;
        self.form.impact = impact;

        match self.submit_entry() {
            Ok(SubmitOutcome::Added(_)) => {
                println!("{} Added risk", style("✓").green());
            }
            Ok(SubmitOutcome::Updated(_)) => {
                println!("{} Saved changes", style("✓").green());
            }
            Err(RegisterError::EmptyDescription) => {
                println!(
                    "{} Risk description cannot be empty.",
                    style("!").yellow()
                );
            }
            Err(e) => return Err(miette::miette!("{}", e)),
        }

        Ok(())
    }

    fn prompt_rating(&self, prompt: &str, current: Rating) -> Result<Rating> {
        let scale: Vec<String> = Rating::scale().iter().map(|r| r.to_string()).collect();
        let index = Select::new()
            .with_prompt(prompt)
            .items(&scale)
            .default((current.get() - 1) as usize)
            .interact()
            .into_diagnostic()?;

        Rating::new(index as u8 + 1).map_err(|e| miette::miette!("{}", e))
    }

    fn prompt_edit(&mut self) -> Result<()> {
        if self.table.is_empty() {
            println!(
                "{} No risk selected. The register is empty.",
                style("!").yellow()
            );
            return Ok(());
        }

        let labels = self.table.labels();
        let position = Select::new()
            .with_prompt("Edit which risk?")
            .items(&labels)
            .default(0)
            .interact()
            .into_diagnostic()?;

        self.begin_edit(position)
            .map_err(|e| miette::miette!("{}", e))?;
        self.prompt_entry()
    }

    fn prompt_delete(&mut self) -> Result<()> {
        if self.table.is_empty() {
            println!(
                "{} No risk selected. The register is empty.",
                style("!").yellow()
            );
            return Ok(());
        }

        let labels = self.table.labels();
        let position = Select::new()
            .with_prompt("Delete which risk?")
            .items(&labels)
            .default(0)
            .interact()
            .into_diagnostic()?;

        let description = truncate_str(&self.table.rows()[position].description, 40);
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", description))
            .default(false)
            .interact()
            .into_diagnostic()?;

        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }

        self.delete(position).map_err(|e| miette::miette!("{}", e))?;
        println!("{} Deleted risk", style("✓").green());
        Ok(())
    }

    fn prompt_organization(&mut self) -> Result<()> {
        let mut input = Input::<String>::new()
            .with_prompt("Organization name")
            .allow_empty(true);
        if !self.organization.is_empty() {
            input = input.default(self.organization.clone());
        }
        self.organization = input.interact_text().into_diagnostic()?;
        Ok(())
    }

    fn run_generate(&mut self) -> Result<()> {
        match self.generate() {
            Ok(report) => {
                println!(
                    "{} Risk register saved to {}",
                    style("✓").green(),
                    style(report.path.display()).cyan()
                );
                println!();
                heatmap::show(&report.organization, &report.grid).into_diagnostic()?;
            }
            Err(ReportError::EmptyRegister) => {
                println!(
                    "{} Please add at least one risk before generating the report.",
                    style("!").yellow()
                );
            }
            Err(e) => return Err(miette::miette!("{}", e)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rating(value: u8) -> Rating {
        Rating::new(value).unwrap()
    }

    fn session() -> Session {
        Session::new(String::new(), PathBuf::from("."))
    }

    fn enter(session: &mut Session, description: &str, likelihood: u8, impact: u8) {
        session.form_mut().description = description.to_string();
        session.form_mut().likelihood = rating(likelihood);
        session.form_mut().impact = rating(impact);
        session.submit_entry().unwrap();
    }

    fn assert_lockstep(session: &Session) {
        assert_eq!(session.register().len(), session.table().len());
        for (position, risk) in session.register().iter().enumerate() {
            let row = &session.table().rows()[position];
            assert_eq!(row.id, risk.id);
            assert_eq!(row.description, risk.description);
            assert_eq!(row.likelihood, risk.likelihood.to_string());
            assert_eq!(row.impact, risk.impact.to_string());
        }
    }

    #[test]
    fn test_adds_keep_store_and_table_in_lockstep() {
        let mut session = session();
        enter(&mut session, "Risk A", 2, 4);
        enter(&mut session, "Risk B", 2, 4);
        enter(&mut session, "Risk C", 5, 1);

        assert_eq!(session.register().len(), 3);
        assert_lockstep(&session);
    }

    #[test]
    fn test_failed_add_changes_nothing() {
        let mut session = session();
        enter(&mut session, "Risk A", 2, 4);

        session.form_mut().description = "   ".to_string();
        assert!(matches!(
            session.submit_entry(),
            Err(RegisterError::EmptyDescription)
        ));

        assert_eq!(session.register().len(), 1);
        assert_lockstep(&session);
    }

    #[test]
    fn test_edit_updates_row_in_place() {
        let mut session = session();
        enter(&mut session, "Risk A", 2, 4);
        enter(&mut session, "Risk B", 2, 4);

        session.begin_edit(1).unwrap();
        assert_eq!(session.form().action_label(), "Save Changes");

        session.form_mut().description = "Risk B revised".to_string();
        session.form_mut().impact = rating(5);
        let outcome = session.submit_entry().unwrap();

        assert!(matches!(outcome, SubmitOutcome::Updated(_)));
        assert_eq!(session.register().len(), 2);
        assert_eq!(
            session.register().risk_at(1).unwrap().description,
            "Risk B revised"
        );
        assert_lockstep(&session);
    }

    #[test]
    fn test_unchanged_edit_is_a_noop() {
        let mut session = session();
        enter(&mut session, "Risk A", 2, 4);
        let before = session.register().risk_at(0).unwrap().clone();

        session.begin_edit(0).unwrap();
        session.submit_entry().unwrap();

        let after = session.register().risk_at(0).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.description, before.description);
        assert_eq!(after.likelihood, before.likelihood);
        assert_eq!(after.impact, before.impact);
        assert_lockstep(&session);
    }

    #[test]
    fn test_delete_removes_exactly_one_row() {
        let mut session = session();
        enter(&mut session, "Risk A", 2, 4);
        enter(&mut session, "Risk B", 2, 4);
        enter(&mut session, "Risk C", 5, 1);

        let removed = session.delete(1).unwrap();
        assert_eq!(removed.description, "Risk B");

        let descriptions: Vec<&str> = session
            .register()
            .iter()
            .map(|r| r.description.as_str())
            .collect();
        assert_eq!(descriptions, ["Risk A", "Risk C"]);
        assert_lockstep(&session);
    }

    #[test]
    fn test_edit_and_delete_out_of_range() {
        let mut session = session();
        assert!(matches!(
            session.begin_edit(0),
            Err(RegisterError::NoSuchPosition(0))
        ));
        assert!(matches!(
            session.delete(3),
            Err(RegisterError::NoSuchPosition(3))
        ));
    }

    #[test]
    fn test_generate_uses_session_organization() {
        let tmp = tempdir().unwrap();
        let mut session = Session::new("Acme".to_string(), tmp.path().to_path_buf());
        enter(&mut session, "Risk A", 2, 4);

        let report = session.generate().unwrap();
        assert!(report.path.ends_with("Acme_risk_register.csv"));
        assert!(report.path.exists());
    }

    #[test]
    fn test_generate_empty_register_is_an_error() {
        let tmp = tempdir().unwrap();
        let session = Session::new("Acme".to_string(), tmp.path().to_path_buf());

        assert!(matches!(
            session.generate(),
            Err(ReportError::EmptyRegister)
        ));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}
