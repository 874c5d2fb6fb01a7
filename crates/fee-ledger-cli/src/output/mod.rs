//! Output formatting for ledger views (JSON, table, plain text).

mod json;
mod text;

pub use json::{export_json, print_json};
pub use text::{audit_lines, money, payment_table, pending_table, student_table, summary_lines};
