use serde::Deserialize;
use validator::Validate;

/// Body of `POST /posts/{id}/comments`. A missing `text` deserializes to an
/// empty string so it fails validation like an empty one.
#[derive(Debug, Validate, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Invalid comment"))]
    pub text: String,
}

/// Text fields of `POST /posts` when sent as a urlencoded form. Absent fields
/// are empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}
