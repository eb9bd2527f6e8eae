pub mod config_store;
pub mod mailer;
pub mod student_store;
pub mod user_store;

mod file;

pub use config_store::JsonConfigStore;
pub use mailer::{DisabledMailer, HttpMailer};
pub use student_store::JsonStudentStore;
pub use user_store::JsonUserStore;
