//! UI primitives for the Fee Ledger CLI.
//!
//! - **Context**: terminal detection (TTY, color, unicode) and currency
//! - **Mode**: output mode resolution (json, plain, pretty)
//! - **Theme**: badges and owo-colors styles
//! - **Render**: tables, headers, receipts, hints

mod context;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{badge, header, hint, kv, receipt, table, Column};
