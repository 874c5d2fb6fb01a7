//! Terminal detection for output decisions.

use std::io::IsTerminal;

use super::OutputMode;

/// Terminal and environment context for rendering.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether color output is enabled
    pub color: bool,
    /// Whether unicode symbols are enabled
    pub unicode: bool,
    /// Resolved output mode
    pub mode: OutputMode,
    /// Currency symbol prefixed to amounts in human output
    pub currency: String,
}

impl UiContext {
    /// Build the context from flags and the environment.
    ///
    /// Color is off for pipes, `--no-color`, `NO_COLOR` and `TERM=dumb`.
    /// Unicode follows the same terminal check.
    pub fn from_env(
        json_flag: bool,
        format_flag: Option<&str>,
        no_color_flag: bool,
        currency: &str,
    ) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var_os("NO_COLOR").is_some();

        Self {
            color: is_tty && !no_color_flag && !no_color_env && !term_is_dumb,
            unicode: is_tty && !term_is_dumb,
            mode: OutputMode::resolve(json_flag, format_flag, is_tty, term_is_dumb),
            currency: currency.to_string(),
        }
    }

    /// Check if interactive prompts are allowed.
    pub fn is_interactive() -> bool {
        std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
    }
}
