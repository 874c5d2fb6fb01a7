//! Output mode routing.

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON only
    Json,
    /// Tab-separated text, stable for scripts
    #[default]
    Plain,
    /// Tables and colors for a terminal
    Pretty,
}

impl OutputMode {
    /// Pick a mode from flags and the terminal.
    ///
    /// `--json` wins over everything. `--format plain` or `TERM=dumb` force
    /// plain text. Otherwise a TTY gets pretty output and a pipe gets plain.
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if format_flag == Some("plain") || term_is_dumb {
            return Self::Plain;
        }
        if is_tty {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_exclusive() {
        let mode = OutputMode::resolve(true, Some("plain"), true, false);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn test_plain_format_forces_plain() {
        assert_eq!(
            OutputMode::resolve(false, Some("plain"), true, false),
            OutputMode::Plain
        );
    }

    #[test]
    fn test_dumb_terminal_forces_plain() {
        assert_eq!(
            OutputMode::resolve(false, None, true, true),
            OutputMode::Plain
        );
    }

    #[test]
    fn test_tty_is_pretty_and_pipe_is_plain() {
        assert_eq!(
            OutputMode::resolve(false, Some("table"), true, false),
            OutputMode::Pretty
        );
        assert_eq!(
            OutputMode::resolve(false, None, false, false),
            OutputMode::Plain
        );
    }
}
