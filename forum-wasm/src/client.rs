use crate::Post;
use crate::draft::{Draft, PostType};
use crate::error::ForumClientError;
use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// The two collaborator contracts the posting form depends on (blob upload,
/// document insert) plus the reads the surrounding pages use.
#[async_trait(?Send)]
pub trait ForumClientTrait {
    async fn upload_image(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ForumClientError>;
    async fn create_post(&self, new_post: NewPostRequest) -> Result<Post, ForumClientError>;
    async fn list_posts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Post>, ForumClientError>;
    async fn get_post_by_id(&self, id: Uuid) -> Result<Post, ForumClientError>;
}

/// Flattened draft fields for the document insert. The code snippet stays
/// in the draft; the stored record never carries it. Identifier and
/// timestamp are assigned by the collaborator at write time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPostRequest {
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub tags: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub img_url: String,
}

impl From<Draft> for NewPostRequest {
    fn from(draft: Draft) -> Self {
        Self {
            post_type: draft.post_type,
            title: draft.title,
            content: draft.content,
            tags: draft.tags,
            abstract_text: draft.abstract_text,
            img_url: draft.img_url,
        }
    }
}

#[derive(Clone)]
pub struct ForumClientHttp {
    pub base_url: String,
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
    pub fn new(endpoint: &str) -> Self {
        Self {
            base_url: endpoint.trim_end_matches('/').to_string(),
        }
    }

    async fn send<T: DeserializeOwned>(request: Request) -> Result<T, ForumClientError> {
        let response = request.send().await?;

        if response.ok() {
            response.json().await.map_err(ForumClientError::from)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(ForumClientError::Http {
                status,
                message: text,
            })
        }
    }
}

#[async_trait(?Send)]
impl ForumClientTrait for ForumClientHttp {
    async fn upload_image(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ForumClientError> {
        let url = format!("{}/api/media/{}", self.base_url, key);
        let body = js_sys::Uint8Array::from(bytes.as_slice());

        let request = Request::put(&url)
            .header("Content-Type", content_type)
            .body(body)?;
        let uploaded: MediaUploadResponse = Self::send(request).await?;
        Ok(uploaded.url)
    }

    async fn create_post(&self, new_post: NewPostRequest) -> Result<Post, ForumClientError> {
        let url = format!("{}/api/posts", self.base_url);
        let request = Request::post(&url).json(&new_post)?;
        Self::send(request).await
    }

    async fn list_posts(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Post>, ForumClientError> {
        let limit = limit.unwrap_or(10).min(100);
        let offset = offset.unwrap_or(0);
        let url = format!(
            "{}/api/posts?limit={}&offset={}",
            self.base_url, limit, offset
        );

        let request = Request::get(&url).build()?;
        let resp: PostsResponse = Self::send(request).await?;
        Ok(resp.posts)
    }

    async fn get_post_by_id(&self, id: Uuid) -> Result<Post, ForumClientError> {
        let url = format!("{}/api/posts/{}", self.base_url, id);
        let request = Request::get(&url)
            .header("Accept", "application/json")
            .build()?;
        Self::send(request).await
    }
}
