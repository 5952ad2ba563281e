pub mod notify_worker;
pub mod services;

pub use notify_worker::NotifyWorker;
