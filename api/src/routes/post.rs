use crate::{
    AppState,
    dto::{CreatePostForm, LikesResponse, MessageResponse},
    errors::ApiError,
    media::Upload,
    models::Post,
    service::NewPost,
};
use axum::{
    Form, Json,
    extract::{
        FromRequest, Path, Request, State,
        multipart::{Multipart, MultipartError},
    },
    http::{StatusCode, header},
};

/// GET /posts
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.posts.list().await)
}

/// POST /posts
/// Body: multipart form with `name`, `title`, `content` and optional
/// `image` / `video` file fields, or a urlencoded form with the text fields
/// only. Any other body (or none) creates a post with empty fields.
pub async fn create_post(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let new_post = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::rejected(e.status(), e.body_text()))?;
        read_new_post(multipart).await?
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(form) = Form::<CreatePostForm>::from_request(request, &state)
            .await
            .map_err(|e| ApiError::rejected(e.status(), e.body_text()))?;
        NewPost {
            name: form.name,
            title: form.title,
            content: form.content,
            ..Default::default()
        }
    } else {
        NewPost::default()
    };

    let post = state.posts.create(new_post).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.posts.delete(&id).await?;

    Ok(Json(MessageResponse {
        message: "Post deleted and files removed".to_string(),
    }))
}

/// POST /posts/{id}/like
pub async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LikesResponse>, ApiError> {
    let likes = state.posts.like(&id).await?;

    Ok(Json(LikesResponse { likes }))
}

/// Missing text fields become empty strings; file fields sent without a
/// file name are treated as absent.
async fn read_new_post(mut multipart: Multipart) -> Result<NewPost, ApiError> {
    let mut new_post = NewPost::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => new_post.name = field.text().await.map_err(bad_form)?,
            "title" => new_post.title = field.text().await.map_err(bad_form)?,
            "content" => new_post.content = field.text().await.map_err(bad_form)?,
            "image" | "video" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(bad_form)?;
                let upload = (!file_name.is_empty()).then(|| Upload {
                    file_name,
                    bytes: bytes.to_vec(),
                });

                if name == "image" {
                    new_post.image = upload;
                } else {
                    new_post.video = upload;
                }
            }
            _ => {}
        }
    }

    Ok(new_post)
}

fn bad_form(err: MultipartError) -> ApiError {
    ApiError::rejected(err.status(), err.body_text())
}
