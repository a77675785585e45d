use crate::service::PostService;
use std::sync::Arc;

// ============================================================================
// APPLICATION STATE - Shared data across all requests
// ============================================================================
/// Cloned into every handler; the service itself lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
}

impl AppState {
    pub fn new(posts: PostService) -> Self {
        Self {
            posts: Arc::new(posts),
        }
    }
}
