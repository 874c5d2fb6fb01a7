//! Path resolution for config and ledger files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_ledger_path, read_config, FeeLedgerConfig};

/// Resolve the config file path, checking FEELEDGER_CONFIG first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("FEELEDGER_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Read the config file if there is one.
pub fn load_config() -> anyhow::Result<Option<FeeLedgerConfig>> {
    let path = resolve_config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(None);
    }
    read_config(&path).map(Some)
}

/// Resolve the ledger path: `--ledger`/FEELEDGER_PATH, then config, then the
/// XDG data default.
pub fn resolve_ledger_path(cli: &Cli, config: Option<&FeeLedgerConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.ledger.as_deref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.ledger.path));
    }
    default_ledger_path()
}

/// Error message when the ledger file is missing.
pub fn missing_ledger_message(path: &Path) -> String {
    format!("No ledger found at {}", path.display())
}

/// Hint shown with [`missing_ledger_message`].
pub fn missing_ledger_hint() -> &'static str {
    "Run:\n  feeledger init\n\nOr specify a ledger path:\n  FEELEDGER_PATH=/path/to/fees.db feeledger init"
}
