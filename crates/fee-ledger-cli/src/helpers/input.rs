//! Interactive prompts.

use dialoguer::Confirm;

use crate::errors::CliError;
use crate::ui::UiContext;

/// Ask for confirmation on a TTY.
///
/// Without a TTY there is nobody to ask, so the caller must pass `--yes`.
pub fn confirm(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !UiContext::is_interactive() {
        return Err(CliError::invalid_input(
            "Refusing to delete without confirmation; pass --yes in non-interactive use",
        )
        .into());
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))
}
