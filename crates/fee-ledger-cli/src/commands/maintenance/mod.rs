mod backup;
mod check;
mod export;
mod sweep;

pub use backup::handle_backup;
pub use check::handle_check;
pub use export::handle_export;
pub use sweep::handle_sweep;
