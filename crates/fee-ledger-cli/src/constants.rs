//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// - 0: Success
/// - 1: General error (anything not classified below)
/// - 2: Usage error (reserved by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Student, ledger or config not found.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// The storage backend failed or could not be opened.
    pub const BACKEND_UNAVAILABLE: i32 = 5;

    /// Integrity check failed or the ledger is inconsistent.
    pub const INTEGRITY_FAILED: i32 = 6;

    /// A cascade delete removed the student but left payments behind.
    pub const PARTIAL_CASCADE: i32 = 7;
}
