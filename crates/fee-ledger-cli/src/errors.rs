//! CLI error types mapped to exit codes.

use std::fmt;

use fee_ledger_core::FeeLedgerError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, ledger, student)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// Integrity check or audit failed
    IntegrityFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::InvalidInput(message) | CliError::IntegrityFailed(message) => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    pub fn integrity_failed(message: impl Into<String>) -> Self {
        CliError::IntegrityFailed(message.into())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }
}

/// Exit code for a core error.
pub fn ledger_exit_code(err: &FeeLedgerError) -> i32 {
    match err {
        FeeLedgerError::NotFound(_) => exit_codes::NOT_FOUND,
        FeeLedgerError::Validation(_) => exit_codes::INVALID_INPUT,
        FeeLedgerError::BackendUnavailable(_) => exit_codes::BACKEND_UNAVAILABLE,
        FeeLedgerError::PartialCascade { .. } => exit_codes::PARTIAL_CASCADE,
    }
}

/// Exit code for any error reaching `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(core) = err.downcast_ref::<FeeLedgerError>() {
        return ledger_exit_code(core);
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_codes() {
        assert_eq!(
            CliError::not_found("missing", "hint").exit_code(),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            CliError::invalid_input("bad").exit_code(),
            exit_codes::INVALID_INPUT
        );
    }

    #[test]
    fn test_core_errors_survive_anyhow() {
        let err: anyhow::Error = FeeLedgerError::NotFound("student s1".into()).into();
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);

        let err: anyhow::Error = FeeLedgerError::PartialCascade {
            student_id: "s1".into(),
            deleted: 1,
            failed: Vec::new(),
        }
        .into();
        assert_eq!(exit_code_for(&err), exit_codes::PARTIAL_CASCADE);
    }

    #[test]
    fn test_context_keeps_downcast() {
        use anyhow::Context;
        let result: anyhow::Result<()> =
            Err(FeeLedgerError::BackendUnavailable("disk".into())).context("loading ledger");
        let err = result.err().expect("error");
        assert_eq!(exit_code_for(&err), exit_codes::BACKEND_UNAVAILABLE);
    }

    #[test]
    fn test_unclassified_error_is_one() {
        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), 1);
    }
}
