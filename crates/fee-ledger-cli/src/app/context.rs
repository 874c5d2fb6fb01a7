//! Application context for the Fee Ledger CLI.
//!
//! Bundles the parsed arguments with the lazily-loaded config file so
//! handlers do not thread both around.

use std::path::PathBuf;

use anyhow::Context;
use once_cell::unsync::OnceCell;

use fee_ledger_core::storage::SqliteStorage;
use fee_ledger_core::FeeLedger;

use crate::cli::Cli;
use crate::config::{FeeLedgerConfig, DEFAULT_CURRENCY_SYMBOL, DEFAULT_DATE_FORMAT};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{
    load_config, missing_ledger_hint, missing_ledger_message, resolve_ledger_path,
};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<FeeLedgerConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, loaded on first use. `None` when there is no file.
    pub fn config(&self) -> anyhow::Result<Option<&FeeLedgerConfig>> {
        Ok(self.config.get_or_try_init(load_config)?.as_ref())
    }

    pub fn ledger_path(&self) -> anyhow::Result<PathBuf> {
        resolve_ledger_path(self.cli, self.config()?)
    }

    pub fn currency_symbol(&self) -> anyhow::Result<String> {
        Ok(self
            .config()?
            .map(|c| c.display.currency_symbol.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()))
    }

    pub fn date_format(&self) -> anyhow::Result<String> {
        Ok(self
            .config()?
            .map(|c| c.display.date_format.clone())
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()))
    }

    /// Build the UI context for a command's output flags.
    pub fn ui(&self, json: bool, format: Option<&str>) -> anyhow::Result<UiContext> {
        let format = crate::helpers::parse_output_format(format)?;
        Ok(UiContext::from_env(
            json,
            format,
            self.cli.no_color,
            &self.currency_symbol()?,
        ))
    }

    /// Open the ledger at the resolved path.
    pub fn open_ledger(&self) -> anyhow::Result<FeeLedger<SqliteStorage>> {
        let path = self.ledger_path()?;
        if !path.exists() {
            return Err(
                CliError::not_found(missing_ledger_message(&path), missing_ledger_hint()).into(),
            );
        }
        tracing::debug!(path = %path.display(), "opening ledger");
        let storage = SqliteStorage::open(&path)
            .with_context(|| format!("Failed to open ledger {}", path.display()))?;
        Ok(FeeLedger::new(storage))
    }
}
