use crate::domain::post::{NewPost, Post, PostType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub img_url: String,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost {
            post_type: req.post_type,
            title: req.title,
            content: req.content,
            tags: req.tags,
            abstract_text: req.abstract_text,
            img_url: req.img_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ListPostsResponse {
    pub posts: Vec<Post>,
    pub total: usize,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MediaUploadResponse {
    pub key: String,
    pub url: String,
}
