pub mod comment;
pub mod health;
pub mod media;
pub mod post;
