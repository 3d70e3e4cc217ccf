use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ForumClientError;
use crate::{ForumClient, NewPost, Post};

#[derive(Clone)]
pub struct ForumClientHttp {
    client: Arc<Client>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    url: String,
}

impl ForumClientHttp {
    pub fn connect(endpoint: &str) -> Result<Self, ForumClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        Ok(Self {
            client: Arc::new(Client::builder().build()?),
            base_url,
        })
    }
}

#[async_trait]
impl ForumClient for ForumClientHttp {
    async fn create_post(&self, new_post: NewPost) -> Result<Post, ForumClientError> {
        let resp = self
            .client
            .post(format!("{}/api/posts", self.base_url))
            .json(&new_post)
            .send()
            .await?;

        if resp.status().is_success() {
            let post: Post = resp.json().await?;
            Ok(post)
        } else {
            Err(ForumClientError::from_http_response(resp).await)
        }
    }

    async fn upload_image(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ForumClientError> {
        let resp = self
            .client
            .put(format!("{}/api/media/{}", self.base_url, key))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if resp.status().is_success() {
            let uploaded: MediaUploadResponse = resp.json().await?;
            Ok(uploaded.url)
        } else {
            Err(ForumClientError::from_http_response(resp).await)
        }
    }

    async fn get_post_by_id(&self, id: Uuid) -> Result<Post, ForumClientError> {
        let resp = self
            .client
            .get(format!("{}/api/posts/{}", self.base_url, id))
            .send()
            .await?;

        if resp.status().is_success() {
            let post: Post = resp.json().await?;
            Ok(post)
        } else {
            Err(ForumClientError::from_http_response(resp).await)
        }
    }

    async fn list_posts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Post>, ForumClientError> {
        let limit = limit.unwrap_or(10).min(100);
        let offset = offset.unwrap_or(0);
        let resp = self
            .client
            .get(format!(
                "{}/api/posts?limit={}&offset={}",
                self.base_url, limit, offset
            ))
            .send()
            .await?;

        if resp.status().is_success() {
            let posts: PostsResponse = resp.json().await?;
            Ok(posts.posts)
        } else {
            Err(ForumClientError::from_http_response(resp).await)
        }
    }
}
