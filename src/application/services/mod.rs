pub mod directory_ping_service;
pub mod external_links_service;
pub mod pingback_service;
pub mod trackback_service;

pub use directory_ping_service::DirectoryPingService;
pub use external_links_service::ExternalLinksService;
pub use pingback_service::PingbackService;
pub use trackback_service::{TrackbackAck, TrackbackService, TrackbackSubmission};
