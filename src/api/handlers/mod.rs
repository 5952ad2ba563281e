//! HTTP request handlers.

pub mod health;
pub mod notify;
pub mod trackback;
pub mod xmlrpc;

pub use health::health_handler;
pub use notify::notify_handler;
pub use trackback::{trackback_get_handler, trackback_post_handler};
pub use xmlrpc::xmlrpc_handler;
