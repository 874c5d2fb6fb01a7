//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{CellAlignment, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::OutputMode;
use super::theme::{styled, styles, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Fee Ledger · command (context)"
/// Plain mode: nothing, so piped output stays data-only
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> Option<String> {
    if !ctx.mode.is_pretty() {
        return None;
    }
    let title = styled("Fee Ledger", styles::bold(), ctx.color);
    Some(match context {
        Some(c) if !c.is_empty() => format!("{} \u{00B7} {} ({})", title, command, c),
        _ => format!("{} \u{00B7} {}", title, command),
    })
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let text = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        text
    } else {
        format!("{} {}", text, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt after a write.
///
/// Pretty mode: badge and indented key-value pairs
/// Plain mode: status line and key=value lines
pub fn receipt(ctx: &UiContext, kind: Badge, title: &str, items: &[(&str, String)]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, kind, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        let status = match kind {
            Badge::Ok | Badge::Info => "ok",
            Badge::Warn => "warn",
            Badge::Err => "error",
        };
        lines.push(format!("status={}", status));
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }
    lines.join("\n")
}

/// Column definition for table rendering.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub numeric: bool,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            numeric: false,
        }
    }

    /// A right-aligned column for amounts and counts.
    pub const fn numeric(header: &'static str) -> Self {
        Self {
            header,
            numeric: true,
        }
    }
}

/// Render rows as a table.
///
/// Pretty mode: bordered comfy-table with a header row
/// Plain mode: tab-separated values, no header
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let mut table = ComfyTable::new();
            if ctx.unicode {
                table
                    .load_preset(UTF8_FULL)
                    .apply_modifier(UTF8_ROUND_CORNERS);
            } else {
                table.load_preset(ASCII_MARKDOWN);
            }
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(columns.iter().map(|c| c.header));
            for row in rows {
                table.add_row(row);
            }
            for (i, col) in columns.iter().enumerate() {
                if col.numeric {
                    if let Some(column) = table.column_mut(i) {
                        column.set_cell_alignment(CellAlignment::Right);
                    }
                }
            }
            table.to_string()
        }
        OutputMode::Plain | OutputMode::Json => rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
