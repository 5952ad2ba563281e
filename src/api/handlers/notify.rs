//! Handler for the publish notification endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::notify::{NotifyRequest, NotifyResponse};
use crate::domain::notify::NotifyJob;
use crate::state::AppState;

/// Enqueues outbound notifications for a freshly published entry.
///
/// # Endpoint
///
/// `POST /notify`
///
/// Returns 202 Accepted immediately; directory pings and external-link
/// pingbacks run on the background worker. A full queue drops the remaining
/// jobs with a warning rather than blocking the publish workflow
/// (fire-and-forget, like click tracking in a redirector).
pub async fn notify_handler(
    State(state): State<AppState>,
    Json(payload): Json<NotifyRequest>,
) -> (StatusCode, Json<NotifyResponse>) {
    let entry = payload.into_entry();
    let mut queued = 0;

    if state.save_ping_directories {
        for directory_url in state.ping_directories.iter() {
            let job = NotifyJob::Directory {
                directory_url: directory_url.clone(),
                entry: entry.clone(),
            };
            queued += enqueue(&state, job);
        }
    }

    if state.save_ping_external_urls {
        queued += enqueue(&state, NotifyJob::ExternalLinks {
            entry: entry.clone(),
        });
    }

    tracing::info!(entry = %entry.url, queued, "publish notification accepted");
    (StatusCode::ACCEPTED, Json(NotifyResponse { queued }))
}

fn enqueue(state: &AppState, job: NotifyJob) -> usize {
    let kind = job.kind();
    match state.notify_sender.try_send(job) {
        Ok(()) => 1,
        Err(e) => {
            tracing::warn!(kind, error = %e, "notification queue full, job dropped");
            0
        }
    }
}
