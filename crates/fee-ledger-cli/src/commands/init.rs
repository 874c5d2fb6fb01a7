use std::path::PathBuf;

use fee_ledger_core::storage::SqliteStorage;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_ledger_path, write_config, FeeLedgerConfig};
use crate::ui::{hint, receipt, Badge};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ledger_path = match args.path.as_deref().or(ctx.cli().ledger.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_ledger_path()?,
    };
    let config_path = match args.config_path.as_deref() {
        Some(path) => PathBuf::from(path),
        None => resolve_config_path()?,
    };

    SqliteStorage::create(&ledger_path)?;

    let write_needed = args.force_config || !config_path.exists();
    if write_needed {
        let config = FeeLedgerConfig::new(&ledger_path, args.currency_symbol.clone());
        write_config(&config_path, &config)?;
    }

    if ctx.quiet() {
        return Ok(());
    }
    let ui = ctx.ui(false, None)?;
    println!(
        "{}",
        receipt(
            &ui,
            Badge::Ok,
            "Ledger created",
            &[
                ("Ledger", ledger_path.display().to_string()),
                ("Config", config_path.display().to_string()),
            ],
        )
    );
    if !write_needed {
        println!(
            "{}",
            hint(
                &ui,
                "existing config kept; pass --force-config to point it at this ledger"
            )
        );
    }
    if ui.mode.is_pretty() {
        println!(
            "{}",
            hint(&ui, "feeledger student add --name <NAME> --room <ROOM>")
        );
    }
    Ok(())
}
