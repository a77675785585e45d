use crate::{AppState, errors::ApiError, media::content_type_for};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

/// GET /uploads/{filename}
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.posts.media().serve(&filename).await?;

    Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], bytes))
}
