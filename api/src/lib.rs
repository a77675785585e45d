//! Minimal content-sharing backend: posts with optional image/video
//! attachments, comments and likes, persisted to a single JSON document.

pub mod config;
pub mod dto;
pub mod errors;
pub mod media;
pub mod models;
pub mod routes;
pub mod service;
pub mod states;
pub mod store;

pub use states::AppState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};
use config::Config;
use media::MediaStore;
use service::PostService;
use std::sync::Arc;
use store::JsonFileStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Wires the file-backed store and media directory from `config`.
pub fn build_state(config: &Config) -> AppState {
    let store = JsonFileStore::new(&config.posts_file);
    let media = MediaStore::new(&config.upload_dir);

    AppState::new(PostService::new(Arc::new(store), media))
}

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/uploads/{filename}", get(routes::media::serve_upload))
        .route(
            "/posts",
            get(routes::post::list_posts).post(routes::post::create_post),
        )
        .route("/posts/{id}", delete(routes::post::delete_post))
        .route("/posts/{id}/like", post(routes::post::like_post))
        .route("/posts/{id}/comments", post(routes::comment::add_comment))
        .route(
            "/posts/{id}/comments/{comment_id}",
            delete(routes::comment::delete_comment),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
