use chrono::Local;

use fee_ledger_core::storage::NewPayment;

use crate::app::AppContext;
use crate::cli::PaymentAddArgs;
use crate::helpers::{parse_date, resolve_student_id};
use crate::output::money;
use crate::ui::{receipt, Badge};

pub fn handle_payment_add(ctx: &AppContext, args: &PaymentAddArgs) -> anyhow::Result<()> {
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => Local::now().date_naive(),
    };

    let ledger = ctx.open_ledger()?;
    let snapshot = ledger.load_all()?;
    let student_id = resolve_student_id(&snapshot, &args.student)?;

    let payment = NewPayment::from_form(
        student_id,
        &args.total_fees,
        &args.paid,
        args.mode.trim(),
        date.format("%Y-%m-%d").to_string(),
    );
    let id = ledger.add_payment(&payment)?;

    if ctx.quiet() {
        println!("{}", id);
        return Ok(());
    }
    let ui = ctx.ui(false, None)?;
    println!(
        "{}",
        receipt(
            &ui,
            Badge::Ok,
            "Payment recorded",
            &[
                ("ID", id.to_string()),
                ("Student", payment.student_id.to_string()),
                ("Total fees", money(&ui, payment.total_fees)),
                ("Paid", money(&ui, payment.paid_amount)),
                ("Balance", money(&ui, payment.balance)),
            ],
        )
    );
    Ok(())
}
