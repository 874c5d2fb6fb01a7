pub mod dashboard;
pub mod init;
pub mod maintenance;
pub mod misc;
pub mod payments;
pub mod students;

pub use dashboard::{handle_pending, handle_summary};
pub use init::handle_init;
pub use maintenance::{handle_backup, handle_check, handle_export, handle_sweep};
pub use misc::handle_completions;
pub use payments::{handle_balance, handle_payment_add, handle_payments};
pub use students::{handle_delete, handle_list, handle_student_add};
