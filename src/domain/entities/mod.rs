pub mod entry;
pub mod linkback;
pub mod outcome;

pub use entry::Entry;
pub use linkback::{Linkback, LinkbackKind, NewLinkback};
pub use outcome::NotificationOutcome;
