use fee_ledger_core::storage::NewStudent;

use crate::app::AppContext;
use crate::cli::StudentAddArgs;
use crate::ui::{receipt, Badge};

pub fn handle_student_add(ctx: &AppContext, args: &StudentAddArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;

    let mut student = NewStudent::new(&args.name, &args.room, &args.lunch_type);
    if let Some(phone) = args.phone.as_deref() {
        student = student.with_phone(phone);
    }
    let id = ledger.add_student(&student)?;

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
            "Student added",
            &[("ID", id.to_string()), ("Name", student.name.clone())],
        )
    );
    Ok(())
}
