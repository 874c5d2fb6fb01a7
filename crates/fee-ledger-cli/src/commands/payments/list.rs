use crate::app::AppContext;
use crate::cli::PaymentsArgs;
use crate::errors::CliError;
use crate::helpers::resolve_student_id;
use crate::output::{money, payment_table, print_json};
use crate::ui::{header, kv};

pub fn handle_payments(ctx: &AppContext, args: &PaymentsArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let snapshot = ledger.load_all()?;
    let student_id = resolve_student_id(&snapshot, &args.student)?;

    let student = snapshot.student(&student_id).ok_or_else(|| {
        CliError::not_found(
            format!("Student {} not found", student_id),
            "Hint: Run `feeledger list` to find student IDs.",
        )
    })?;
    let payments = snapshot.payments_for_student(&student_id);
    let aggregate = snapshot.aggregate_for(&student_id);

    let ui = ctx.ui(args.json, args.format.as_deref())?;
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "student": student,
            "totals": aggregate,
            "payments": payments,
        }));
    }

    if !ctx.quiet() {
        if let Some(line) = header(&ui, "payments", Some(&student.name)) {
            println!("{}", line);
        }
    }
    if payments.is_empty() {
        if !ctx.quiet() {
            println!("No payments recorded for {}.", student.name);
        }
        return Ok(());
    }
    println!("{}", payment_table(&ui, &payments, &ctx.date_format()?));
    if ui.mode.is_pretty() && !ctx.quiet() {
        println!("{}", kv(&ui, "Total paid", &money(&ui, aggregate.total_paid)));
        println!(
            "{}",
            kv(&ui, "Balance", &money(&ui, aggregate.total_balance))
        );
    }
    Ok(())
}
