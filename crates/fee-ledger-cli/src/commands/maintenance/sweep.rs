use crate::app::AppContext;
use crate::ui::{badge, receipt, Badge};

pub fn handle_sweep(ctx: &AppContext) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let report = ledger.sweep_orphans()?;
    let ui = ctx.ui(false, None)?;

    if !report.failed.is_empty() {
        eprintln!(
            "{}",
            badge(
                &ui,
                Badge::Warn,
                &format!(
                    "{} orphan payment(s) could not be removed",
                    report.failed.len()
                )
            )
        );
        for id in &report.failed {
            eprintln!("- {}", id);
        }
        return Err(anyhow::anyhow!(
            "Orphan sweep incomplete; run `feeledger sweep` again"
        ));
    }

    if !ctx.quiet() {
        if report.removed.is_empty() && report.already_gone.is_empty() {
            println!("{}", badge(&ui, Badge::Info, "No orphan payments"));
        } else {
            println!(
                "{}",
                receipt(
                    &ui,
                    Badge::Ok,
                    "Orphan payments removed",
                    &[
                        ("Removed", report.removed.len().to_string()),
                        ("Already gone", report.already_gone.len().to_string()),
                    ],
                )
            );
        }
    }
    Ok(())
}
