mod comment;
mod post;

pub use comment::Comment;
pub use post::Post;

use chrono::Local;
use uuid::Uuid;

/// Format used for every `timestamp` field, local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
