use std::path::Path;

use anyhow::Context;

use fee_ledger_core::fs::write_atomic;

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::output::export_json;

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let snapshot = ledger.load_all()?;
    let document = serde_json::to_string_pretty(&export_json(&snapshot))?;

    match args.output.as_deref() {
        None => println!("{}", document),
        Some(path) => {
            let destination = Path::new(path);
            if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create export directory {}", parent.display())
                })?;
            }
            write_atomic(destination, format!("{}\n", document).as_bytes())
                .with_context(|| format!("Failed to write export {}", destination.display()))?;
            if !ctx.quiet() {
                println!("Exported ledger to {}", destination.display());
            }
        }
    }
    Ok(())
}
