//! Data Transfer Objects for the HTTP surface.

pub mod health;
pub mod notify;
pub mod trackback;
