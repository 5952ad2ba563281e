//! DTOs for the trackback endpoint.

use serde::Deserialize;

use crate::application::services::{TrackbackAck, TrackbackSubmission};
use crate::infrastructure::xmlrpc::codec::escape;

/// Trackback form fields. Remote clients routinely omit everything but the
/// URL, and some send empty strings instead of omitting fields.
#[derive(Debug, Deserialize)]
pub struct TrackbackForm {
    pub url: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub blog_name: Option<String>,
}

impl TrackbackForm {
    /// Converts the form into a submission; `None` when no URL was sent.
    pub fn into_submission(self) -> Option<TrackbackSubmission> {
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        Some(TrackbackSubmission {
            url,
            title: self.title,
            excerpt: self.excerpt,
            blog_name: self.blog_name,
        })
    }
}

/// Renders the Trackback XML acknowledgement.
pub fn render_ack(ack: &TrackbackAck) -> String {
    match &ack.error {
        None => "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<response>\n  <error>0</error>\n</response>\n"
            .to_string(),
        Some(message) => format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<response>\n  <error>1</error>\n  <message>{}</message>\n</response>\n",
            escape(message)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_success_ack() {
        let doc = render_ack(&TrackbackAck::ok());
        assert!(doc.contains("<error>0</error>"));
        assert!(!doc.contains("<message>"));
    }

    #[test]
    fn test_render_rejection_escapes_message() {
        let doc = render_ack(&TrackbackAck::rejected("Trackback is not enabled for <Entry>"));
        assert!(doc.contains("<error>1</error>"));
        assert!(doc.contains("<message>Trackback is not enabled for &lt;Entry&gt;</message>"));
    }

    #[test]
    fn test_into_submission_requires_url() {
        let form = TrackbackForm {
            url: Some("  ".to_string()),
            title: None,
            excerpt: None,
            blog_name: None,
        };
        assert!(form.into_submission().is_none());
    }
}
