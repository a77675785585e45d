mod requests;
mod responses;

pub use requests::{CommentRequest, CreatePostForm};
pub use responses::{LikesResponse, MessageResponse};
