use std::path::Path;

use anyhow::Context;

use crate::app::AppContext;

pub fn handle_backup(ctx: &AppContext, destination: &str) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let destination = Path::new(destination);
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create backup directory {}", parent.display())
        })?;
    }

    ledger.backend().backup_to(destination)?;

    let size = std::fs::metadata(destination)
        .with_context(|| format!("Backup missing after write: {}", destination.display()))?
        .len();
    if size == 0 {
        return Err(anyhow::anyhow!("Backup failed: zero bytes written"));
    }
    if !ctx.quiet() {
        println!("Backed up ledger to {}", destination.display());
    }
    Ok(())
}
