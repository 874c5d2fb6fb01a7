use fee_ledger_core::amount::{compute_balance, in_range, parse_amount, MAX_AMOUNT};

use crate::app::AppContext;
use crate::cli::BalanceArgs;
use crate::errors::CliError;
use crate::output::money;
use crate::ui::kv;

/// Preview the balance a payment form would store; touches no ledger.
pub fn handle_balance(ctx: &AppContext, args: &BalanceArgs) -> anyhow::Result<()> {
    for (label, raw) in [("total fees", &args.total_fees), ("paid", &args.paid)] {
        match parse_amount(raw) {
            Some(amount) if !in_range(amount) => {
                return Err(CliError::invalid_input(format!(
                    "The {} amount exceeds the supported maximum of {}",
                    label, MAX_AMOUNT
                ))
                .into());
            }
            None if !raw.trim().is_empty() => {
                tracing::warn!(field = label, input = %raw, "unparseable amount treated as 0");
            }
            _ => {}
        }
    }

    let balance = compute_balance(&args.total_fees, &args.paid);
    let ui = ctx.ui(false, None)?;
    if ctx.quiet() {
        println!("{}", money(&ui, balance));
    } else {
        println!("{}", kv(&ui, "Balance", &money(&ui, balance)));
    }
    Ok(())
}
