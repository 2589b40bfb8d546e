pub mod admin;
pub mod health;
pub mod list;
pub mod public;

pub use admin::{admin_page_handler, admin_submit_handler};
pub use health::health_handler;
pub use list::list_handler;
pub use public::public_handler;
