//! Parsing helpers for dates, output formats and student references.

use chrono::NaiveDate;

use fee_ledger_core::storage::StudentId;
use fee_ledger_core::Snapshot;

use crate::errors::CliError;

/// Parse a payment date (YYYY-MM-DD).
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CliError::invalid_input(format!("Invalid date (expected YYYY-MM-DD): {}", value)).into()
    })
}

/// Render a stored date with the configured format.
///
/// Stored dates that do not parse as YYYY-MM-DD are shown unchanged.
pub fn display_date(stored: &str, format: &str) -> String {
    match NaiveDate::parse_from_str(stored, "%Y-%m-%d") {
        Ok(date) => date.format(format).to_string(),
        Err(_) => stored.to_string(),
    }
}

/// Output format for table views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Plain => "plain",
        }
    }
}

/// Parse the `--format` flag.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<&'static str>> {
    let format = match value {
        None => None,
        Some("table") => Some(OutputFormat::Table),
        Some("plain") => Some(OutputFormat::Plain),
        Some(other) => {
            return Err(CliError::invalid_input(format!(
                "Unsupported format: {} (use table or plain)",
                other
            ))
            .into())
        }
    };
    Ok(format.map(|f| f.as_str()))
}

/// Resolve a full student ID or a unique prefix against the snapshot.
///
/// An input matching no student is passed through unchanged so the engine
/// reports it as not found. An ambiguous prefix is an input error.
pub fn resolve_student_id(snapshot: &Snapshot, input: &str) -> anyhow::Result<StudentId> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::invalid_input("Student ID cannot be empty").into());
    }
    if let Some(student) = snapshot.students().iter().find(|s| s.id.as_str() == input) {
        return Ok(student.id.clone());
    }

    let matches: Vec<&StudentId> = snapshot
        .students()
        .iter()
        .map(|s| &s.id)
        .filter(|id| id.as_str().starts_with(input))
        .collect();
    match matches.as_slice() {
        [] => Ok(StudentId::from(input)),
        [only] => Ok((*only).clone()),
        _ => Err(CliError::invalid_input(format!(
            "Student ID prefix \"{}\" is ambiguous ({} matches)",
            input,
            matches.len()
        ))
        .into()),
    }
}
