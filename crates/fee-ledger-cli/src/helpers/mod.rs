//! Input and parsing helper functions for the CLI.

mod input;
mod parsing;

pub use input::confirm;
pub use parsing::{display_date, parse_date, parse_output_format, resolve_student_id};
