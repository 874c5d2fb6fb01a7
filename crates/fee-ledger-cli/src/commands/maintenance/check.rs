use fee_ledger_core::engine::audit;

use crate::app::AppContext;
use crate::cli::ViewArgs;
use crate::errors::CliError;
use crate::output::{audit_lines, print_json};
use crate::ui::{badge, hint, Badge};

/// Database integrity plus the ledger audit (orphans, balance mismatches).
pub fn handle_check(ctx: &AppContext, args: &ViewArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let ui = ctx.ui(args.json, args.format.as_deref())?;

    if let Err(err) = ledger.backend().check_integrity() {
        eprintln!("{}", badge(&ui, Badge::Err, "Integrity check: FAILED"));
        eprintln!("- error: {}", err);
        eprintln!(
            "{}",
            hint(&ui, "restore from a backup or export data before retrying")
        );
        return Err(CliError::integrity_failed("Integrity check failed").into());
    }

    let report = audit(&ledger.load_all()?);
    if ui.mode.is_json() {
        print_json(&report)?;
    } else if report.is_clean() {
        if !ctx.quiet() {
            println!("{}", badge(&ui, Badge::Ok, "Integrity check: OK"));
            println!("{}", badge(&ui, Badge::Ok, "Ledger audit: OK"));
        }
    } else {
        if !ctx.quiet() {
            println!("{}", badge(&ui, Badge::Ok, "Integrity check: OK"));
        }
        println!("{}", badge(&ui, Badge::Warn, "Ledger audit: issues found"));
        for line in audit_lines(&ui, &report) {
            println!("- {}", line);
        }
        if !report.orphans.is_empty() {
            println!(
                "{}",
                hint(&ui, "run `feeledger sweep` to remove orphan payments")
            );
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::integrity_failed(format!(
            "Ledger audit found {} orphan payment(s) and {} balance mismatch(es)",
            report.orphans.len(),
            report.balance_mismatches.len()
        ))
        .into())
    }
}
