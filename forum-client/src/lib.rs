use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ForumClientError;

mod error;
mod http_client;

pub use error::ForumClientError as Error;
pub use http_client::ForumClientHttp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    #[display("question")]
    Question,
    #[display("article")]
    Article,
}

#[derive(Debug, Clone, Serialize, Deserialize, Display)]
#[display("Post {{ id: {}, type: {}, title: {} }}", id, post_type, title)]
pub struct Post {
    pub id: Uuid,
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub tags: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub img_url: String,
    pub created_at: DateTime<Utc>,
}

/// The flattened draft fields sent to the document-insert operation.
/// The identifier and timestamp are assigned server-side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPost {
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub tags: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub img_url: String,
}

/// Derive a storage key for an upload: current milliseconds concatenated
/// with the original filename. Practically unique per upload, not
/// collision-proof.
pub fn storage_key(filename: &str) -> String {
    format!("{}{}", Utc::now().timestamp_millis(), filename)
}

#[async_trait::async_trait]
pub trait ForumClient {
    async fn create_post(&self, new_post: NewPost) -> Result<Post, ForumClientError>;
    async fn upload_image(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ForumClientError>;
    async fn get_post_by_id(&self, id: Uuid) -> Result<Post, ForumClientError>;
    async fn list_posts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Post>, ForumClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_keeps_the_filename_as_suffix() {
        let key = storage_key("cat.png");
        assert!(key.ends_with("cat.png"));
        assert!(key.len() > "cat.png".len());
        assert!(key[..key.len() - "cat.png".len()]
            .bytes()
            .all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn new_post_serializes_abstract_under_its_wire_name() {
        let post = NewPost {
            post_type: PostType::Article,
            title: "t".into(),
            abstract_text: "a".into(),
            ..NewPost::default()
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["abstract"], "a");
        assert_eq!(value["post_type"], "article");
    }
}
