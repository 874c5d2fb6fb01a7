mod add;
mod balance;
mod list;

pub use add::handle_payment_add;
pub use balance::handle_balance;
pub use list::handle_payments;
