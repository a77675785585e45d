//! Post operations over the document store and media sidecar.
//!
//! Each operation loads the whole collection, finds its target with a linear
//! scan, mutates in memory and saves the whole collection back.

use crate::{
    errors::ServiceError,
    media::{MediaStore, RemoveOutcome, Upload},
    models::{Comment, Post, new_id, now_timestamp},
    store::PostStore,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Fields of a post submitted by a client.
#[derive(Debug, Default)]
pub struct NewPost {
    pub name: String,
    pub title: String,
    pub content: String,
    pub image: Option<Upload>,
    pub video: Option<Upload>,
}

pub struct PostService {
    store: Arc<dyn PostStore>,
    media: MediaStore,
    // Serializes load-mutate-save so concurrent writers don't drop updates.
    write_lock: Mutex<()>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, media: MediaStore) -> Self {
        Self {
            store,
            media,
            write_lock: Mutex::new(()),
        }
    }

    pub fn media(&self) -> &MediaStore {
        &self.media
    }

    pub async fn list(&self) -> Vec<Post> {
        self.store.load().await
    }

    pub async fn create(&self, new_post: NewPost) -> Result<Post, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load().await;

        let image = self.media.store(new_post.image).await?;
        let video = match self.media.store(new_post.video).await {
            Ok(video) => video,
            Err(e) => {
                self.discard_media(&[&image]).await;
                return Err(e.into());
            }
        };

        let post = Post {
            id: new_id(),
            name: new_post.name,
            title: new_post.title,
            content: new_post.content,
            timestamp: now_timestamp(),
            image,
            video,
            comments: Vec::new(),
            likes: 0,
        };

        posts.push(post.clone());
        if let Err(e) = self.store.save(&posts).await {
            self.discard_media(&[&post.image, &post.video]).await;
            return Err(e.into());
        }

        info!("Post created: {} by {:?}", post.id, post.name);
        Ok(post)
    }

    pub async fn delete(&self, post_id: &str) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load().await;

        let post = posts
            .iter()
            .find(|p| p.id == post_id)
            .ok_or(ServiceError::NotFound("Post"))?;

        self.discard_media(&[&post.image, &post.video]).await;

        posts.retain(|p| p.id != post_id);
        self.store.save(&posts).await?;

        info!("Post deleted: {}", post_id);
        Ok(())
    }

    pub async fn add_comment(&self, post_id: &str, text: &str) -> Result<Post, ServiceError> {
        if text.is_empty() {
            return Err(ServiceError::InvalidInput("Invalid comment".into()));
        }

        self.update_post(post_id, |post| {
            post.comments.push(Comment {
                id: new_id(),
                text: text.to_string(),
                timestamp: now_timestamp(),
            });
            info!("Comment added to post {}", post.id);
            post.clone()
        })
        .await
    }

    /// Unknown comment ids leave the post untouched and still succeed.
    pub async fn remove_comment(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<Post, ServiceError> {
        self.update_post(post_id, |post| {
            post.comments.retain(|c| c.id != comment_id);
            post.clone()
        })
        .await
    }

    pub async fn like(&self, post_id: &str) -> Result<u64, ServiceError> {
        self.update_post(post_id, |post| {
            post.likes = post.likes.saturating_add(1);
            post.likes
        })
        .await
    }

    async fn update_post<T>(
        &self,
        post_id: &str,
        mutate: impl FnOnce(&mut Post) -> T,
    ) -> Result<T, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.store.load().await;

        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(ServiceError::NotFound("Post"))?;
        let out = mutate(post);

        self.store.save(&posts).await?;
        Ok(out)
    }

    async fn discard_media(&self, references: &[&Option<String>]) {
        for reference in references.iter().filter_map(|r| r.as_deref()) {
            if self.media.remove(reference).await == RemoveOutcome::Failed {
                warn!("Leaving orphaned media {}", reference);
            }
        }
    }
}
