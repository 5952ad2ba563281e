//! Linkback entity: a persisted backlink record.

use chrono::{DateTime, Utc};

/// Protocol a linkback was registered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkbackKind {
    Pingback,
    Trackback,
}

impl LinkbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkbackKind::Pingback => "pingback",
            LinkbackKind::Trackback => "trackback",
        }
    }
}

impl std::str::FromStr for LinkbackKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pingback" => Ok(LinkbackKind::Pingback),
            "trackback" => Ok(LinkbackKind::Trackback),
            other => Err(format!("unknown linkback kind '{other}'")),
        }
    }
}

/// A verified backlink attached to an entry.
///
/// Unique per `(entry_id, source_url, site)`; uniqueness is enforced by the
/// store's create-if-absent operation, not computed here.
#[derive(Debug, Clone)]
pub struct Linkback {
    pub id: i64,
    pub entry_id: i64,
    pub source_url: String,
    pub title: String,
    pub excerpt: String,
    pub kind: LinkbackKind,
    pub site: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a new linkback.
#[derive(Debug, Clone)]
pub struct NewLinkback {
    pub entry_id: i64,
    pub source_url: String,
    pub title: String,
    pub excerpt: String,
    pub kind: LinkbackKind,
    pub site: String,
}
