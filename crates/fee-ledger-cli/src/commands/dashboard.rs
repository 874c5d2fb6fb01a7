use rust_decimal::Decimal;

use crate::app::AppContext;
use crate::cli::ViewArgs;
use crate::output::{money, pending_table, print_json, summary_lines};
use crate::ui::{header, kv};

pub fn handle_summary(ctx: &AppContext, args: &ViewArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let summary = ledger.load_all()?.summary();

    let ui = ctx.ui(args.json, args.format.as_deref())?;
    if ui.mode.is_json() {
        return print_json(&summary);
    }
    if !ctx.quiet() {
        if let Some(line) = header(&ui, "summary", None) {
            println!("{}", line);
        }
    }
    for line in summary_lines(&ui, &summary) {
        println!("{}", line);
    }
    Ok(())
}

pub fn handle_pending(ctx: &AppContext, args: &ViewArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let snapshot = ledger.load_all()?;
    let pending = snapshot.pending();

    let ui = ctx.ui(args.json, args.format.as_deref())?;
    if ui.mode.is_json() {
        return print_json(&pending);
    }

    if pending.is_empty() {
        if !ctx.quiet() {
            println!("No pending fees.");
        }
        return Ok(());
    }
    if !ctx.quiet() {
        if let Some(line) = header(&ui, "pending", None) {
            println!("{}", line);
        }
    }
    println!("{}", pending_table(&ui, &pending));
    if ui.mode.is_pretty() && !ctx.quiet() {
        let total = pending
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.pending));
        println!("{}", kv(&ui, "Outstanding", &money(&ui, total)));
    }
    Ok(())
}
