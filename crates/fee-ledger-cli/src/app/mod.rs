//! Application-level utilities for the Fee Ledger CLI.
//!
//! - Path resolution for config and ledger files
//! - The per-invocation context with lazy config loading

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::resolve_config_path;
