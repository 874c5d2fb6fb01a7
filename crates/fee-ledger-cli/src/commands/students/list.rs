use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::{print_json, student_table};
use crate::ui::header;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let snapshot = ledger.load_all()?;
    let rows = snapshot.rows(&args.query);

    let ui = ctx.ui(args.json, args.format.as_deref())?;
    if ui.mode.is_json() {
        return print_json(&rows);
    }

    if rows.is_empty() {
        if !ctx.quiet() {
            if args.query.is_empty() {
                println!("No students yet.");
            } else {
                println!("No students match \"{}\".", args.query);
            }
        }
        return Ok(());
    }

    if !ctx.quiet() {
        if let Some(line) = header(&ui, "students", Some(&args.query)) {
            println!("{}", line);
        }
    }
    println!("{}", student_table(&ui, &rows, &ctx.date_format()?));
    Ok(())
}
