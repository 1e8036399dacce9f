//! Contact form endpoint.
//!
//! `POST` accepts a submission from any of the site forms; `GET` lists the
//! most recent ones for an admin.

use axum::{body::Bytes, extract::rejection::BytesRejection, extract::State, Json};

use crate::extractors::{AdminKey, ClientIp, UserAgent};
use crate::response::{ApiError, ListResponse, SubmitResponse};
use crate::state::AppState;

/// POST /api/contact - Accept a lead submission.
pub async fn submit_handler(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    UserAgent(user_agent): UserAgent,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    // Oversized bodies never reach the limiter
    let body = body?;

    let submission = state
        .service
        .submit(&body, &client_ip, user_agent.as_deref())
        .await?;

    Ok(Json(SubmitResponse::accepted(submission.id)))
}

/// GET /api/contact - List recent submissions (requires `X-API-Key`).
pub async fn list_handler(
    State(state): State<AppState>,
    AdminKey(api_key): AdminKey,
) -> Result<Json<ListResponse>, ApiError> {
    let recent = state.service.list_recent(api_key.as_deref())?;

    Ok(Json(ListResponse {
        success: true,
        count: recent.count,
        submissions: recent.submissions,
    }))
}
