// ============================================================================
// POSTBOARD - posts, comments, likes and media uploads over a JSON document
// ============================================================================

use postboard_api::{build_router, build_state, config::Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let state = build_state(&config);
    state.posts.media().ensure_dir().await?;

    let app = build_router(state, config.max_upload_bytes);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    info!("Server running on http://{}", config.bind_addr);
    info!("Posts file: {}", config.posts_file.display());
    info!("Upload dir: {}", config.upload_dir.display());
    info!("API Endpoints:");
    info!("  GET    /health                             - Health check");
    info!("  GET    /posts                              - List posts");
    info!("  POST   /posts                              - Create post (multipart)");
    info!("  DELETE /posts/{{id}}                         - Delete post and its media");
    info!("  POST   /posts/{{id}}/comments                - Add comment");
    info!("  DELETE /posts/{{id}}/comments/{{comment_id}}   - Remove comment");
    info!("  POST   /posts/{{id}}/like                    - Like post");
    info!("  GET    /uploads/{{filename}}                 - Serve uploaded media");

    axum::serve(listener, app).await?;
    Ok(())
}
