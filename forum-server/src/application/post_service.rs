use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::{
    error::DomainError,
    post::{NewPost, Post},
};
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct PostService<R: PostRepository + 'static> {
    repo: Arc<R>,
}

impl<R> PostService<R>
where
    R: PostRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(id))
    }

    pub async fn get_posts(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Post>, DomainError> {
        self.repo.get_posts(limit, offset).await
    }

    #[instrument(skip(self))]
    pub async fn create_post(&self, new: NewPost) -> Result<Post, DomainError> {
        new.validate()?;
        self.repo.create(Post::new(new)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::PostType;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryPostRepository {
        posts: Mutex<Vec<Post>>,
    }

    #[async_trait]
    impl PostRepository for InMemoryPostRepository {
        async fn create(&self, post: Post) -> Result<Post, DomainError> {
            self.posts.lock().unwrap().push(post.clone());
            Ok(post)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
            Ok(self
                .posts
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn get_posts(
            &self,
            _limit: Option<usize>,
            _offset: Option<usize>,
        ) -> Result<Vec<Post>, DomainError> {
            Ok(self.posts.lock().unwrap().clone())
        }
    }

    fn service() -> (
        Arc<InMemoryPostRepository>,
        PostService<InMemoryPostRepository>,
    ) {
        let repo = Arc::new(InMemoryPostRepository::default());
        (Arc::clone(&repo), PostService::new(repo))
    }

    #[tokio::test]
    async fn create_inserts_exactly_one_record_with_submitted_fields() {
        let (repo, service) = service();

        let created = service
            .create_post(NewPost {
                post_type: PostType::Question,
                title: "How to center a div".into(),
                content: "Using flex".into(),
                tags: "css,flexbox".into(),
                ..NewPost::default()
            })
            .await
            .unwrap();

        let stored = repo.posts.lock().unwrap().clone();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "How to center a div");
        assert_eq!(stored[0].content, "Using flex");
        assert_eq!(stored[0].tags, "css,flexbox");
        assert!(stored[0].img_url.is_empty());
        assert!(stored[0].abstract_text.is_empty());
        assert_eq!(stored[0].id, created.id);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_repository() {
        let (repo, service) = service();

        let result = service
            .create_post(NewPost {
                post_type: PostType::Question,
                title: "How to center a div".into(),
                content: "Using flex".into(),
                ..NewPost::default()
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(repo.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_post_reports_missing_id() {
        let (_, service) = service();
        let id = Uuid::new_v4();

        assert!(matches!(
            service.get_post(id).await,
            Err(DomainError::PostNotFound(missing)) if missing == id
        ));
    }
}
