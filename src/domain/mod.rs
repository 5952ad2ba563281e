pub mod entities;
pub mod notify;
pub mod pingback;
pub mod repositories;
