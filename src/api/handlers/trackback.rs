//! Handlers for the trackback endpoint.

use axum::{
    Form,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};

use crate::api::dto::trackback::{TrackbackForm, render_ack};
use crate::application::services::TrackbackAck;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a trackback against a local entry.
///
/// # Endpoint
///
/// `POST /trackback/{id}`
///
/// The response body is always the Trackback XML acknowledgement: `error 0`
/// on success, `error 1` plus a message for protocol rejections (trackbacks
/// disabled, duplicate, missing URL). Only an unknown entry surfaces as an
/// HTTP error (404).
pub async fn trackback_post_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Form(form): Form<TrackbackForm>,
) -> Result<Response, AppError> {
    let Some(submission) = form.into_submission() else {
        return Ok(xml(render_ack(&TrackbackAck::rejected("A url is required"))));
    };

    let ack = state.trackback_service.register(id, submission).await?;
    Ok(xml(render_ack(&ack)))
}

/// Redirects browsers hitting the trackback URL to the entry itself.
///
/// # Endpoint
///
/// `GET /trackback/{id}`
pub async fn trackback_get_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let url = state.trackback_service.entry_url(id).await?;
    Ok(Redirect::permanent(&url))
}

fn xml(doc: String) -> Response {
    ([(header::CONTENT_TYPE, "text/xml; charset=utf-8")], doc).into_response()
}
