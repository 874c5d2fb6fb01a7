use fee_ledger_core::FeeLedgerError;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::helpers::{confirm, resolve_student_id};
use crate::ui::{badge, hint, receipt, Badge};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let snapshot = ledger.load_all()?;
    let student_id = resolve_student_id(&snapshot, &args.student)?;

    if let Some(student) = snapshot.student(&student_id) {
        let count = snapshot.payments_for_student(&student_id).len();
        let prompt = format!(
            "Delete {} and {} payment{}?",
            student.name,
            count,
            if count == 1 { "" } else { "s" }
        );
        if !confirm(&prompt, args.yes)? {
            if !ctx.quiet() {
                println!("Delete cancelled.");
            }
            return Ok(());
        }
    }

    let ui = ctx.ui(false, None)?;
    match ledger.delete_student(&student_id) {
        Ok(report) => {
            if !ctx.quiet() {
                let mut items = vec![
                    ("Student", report.student_id.to_string()),
                    ("Payments deleted", report.payments_deleted.to_string()),
                ];
                if report.payments_already_gone > 0 {
                    items.push((
                        "Already gone",
                        report.payments_already_gone.to_string(),
                    ));
                }
                println!("{}", receipt(&ui, Badge::Ok, "Student deleted", &items));
            }
            Ok(())
        }
        Err(err @ FeeLedgerError::PartialCascade { .. }) => {
            eprintln!("{}", badge(&ui, Badge::Warn, &err.to_string()));
            eprintln!(
                "{}",
                hint(&ui, "run `feeledger sweep` to remove the remaining payments")
            );
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}
