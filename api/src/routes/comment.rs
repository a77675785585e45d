use crate::{AppState, dto::CommentRequest, errors::ApiError, models::Post};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use validator::Validate;

/// POST /posts/{id}/comments
/// Body: { "text": "..." }
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Post>, ApiError> {
    // Any body that isn't an object with a non-empty string `text` is the
    // same 400, whatever the post id.
    let payload: CommentRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::ValidationError("Invalid comment".into()))?;
    payload
        .validate()
        .map_err(|_| ApiError::ValidationError("Invalid comment".into()))?;

    let post = state.posts.add_comment(&id, &payload.text).await?;

    Ok(Json(post))
}

/// DELETE /posts/{id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.remove_comment(&id, &comment_id).await?;

    Ok(Json(post))
}
