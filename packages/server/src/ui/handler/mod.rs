//! Request handlers.

mod http;
mod page;

pub use http::{get_chats, get_qr, get_status, get_unanswered};
pub use page::status_page;
