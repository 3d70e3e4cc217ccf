use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all the required fields.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "post_type", rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Question,
    Article,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub tags: String,
    #[serde(rename = "abstract")]
    #[sqlx(rename = "abstract")]
    pub abstract_text: String,
    pub img_url: String,
    pub created_at: DateTime<Utc>,
}

/// A post as submitted by a client, before the server assigns identity
/// and a write timestamp.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub abstract_text: String,
    pub img_url: String,
}

impl NewPost {
    /// Required fields: title and content always; tags for questions,
    /// abstract for articles. The image URL and code snippet are never
    /// required.
    pub fn validate(&self) -> Result<(), DomainError> {
        let missing = self.title.trim().is_empty()
            || self.content.trim().is_empty()
            || (self.post_type == PostType::Question && self.tags.trim().is_empty())
            || (self.post_type == PostType::Article && self.abstract_text.trim().is_empty());

        if missing {
            return Err(DomainError::Validation(REQUIRED_FIELDS_MESSAGE.into()));
        }
        Ok(())
    }
}

impl Post {
    pub fn new(new: NewPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_type: new.post_type,
            title: new.title,
            content: new.content,
            tags: new.tags,
            abstract_text: new.abstract_text,
            img_url: new.img_url,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> NewPost {
        NewPost {
            post_type: PostType::Question,
            title: "How to center a div".into(),
            content: "Using flex".into(),
            tags: "css,flexbox".into(),
            ..NewPost::default()
        }
    }

    fn article() -> NewPost {
        NewPost {
            post_type: PostType::Article,
            title: "Centering in 2024".into(),
            content: "Long form text".into(),
            abstract_text: "A short overview".into(),
            ..NewPost::default()
        }
    }

    #[test]
    fn complete_question_passes() {
        assert!(question().validate().is_ok());
    }

    #[test]
    fn question_without_tags_fails() {
        let mut post = question();
        post.tags.clear();
        assert!(matches!(
            post.validate(),
            Err(DomainError::Validation(msg)) if msg == REQUIRED_FIELDS_MESSAGE
        ));
    }

    #[test]
    fn article_without_abstract_fails() {
        let mut post = article();
        post.abstract_text.clear();
        assert!(post.validate().is_err());
    }

    #[test]
    fn article_does_not_require_tags() {
        assert!(article().validate().is_ok());
    }

    #[test]
    fn image_url_is_never_required() {
        let post = question();
        assert!(post.img_url.is_empty());
        assert!(post.validate().is_ok());
    }

    #[test]
    fn new_post_gets_server_assigned_timestamp() {
        let post = Post::new(question());
        assert!(post.created_at <= Utc::now());
        assert!(post.abstract_text.is_empty());
    }
}
