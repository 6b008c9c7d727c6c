mod diagnostics;
pub mod users;

pub use diagnostics::exception_test;
pub use users::{create_user, delete_user, get_user, list_users, update_user};
