mod add;
mod delete;
mod list;

pub use add::handle_student_add;
pub use delete::handle_delete;
pub use list::handle_list;
