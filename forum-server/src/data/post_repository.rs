use crate::domain::error::DomainError;
use crate::domain::post::Post;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: Post) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    async fn get_posts(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Post>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, post_type, title, content, tags, abstract, img_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.id)
        .bind(post.post_type)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.tags)
        .bind(&post.abstract_text)
        .bind(&post.img_url)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create post: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(post_id = %post.id, post_type = ?post.post_type, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, post_type, title, content, tags, abstract, img_url, created_at
            FROM posts WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn get_posts(
        &self,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Post>, DomainError> {
        let limit = limit.unwrap_or(10).min(100) as i64;
        let offset = offset.unwrap_or(0) as i64;

        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, post_type, title, content, tags, abstract, img_url, created_at
            FROM posts
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching posts: {}", e);
            DomainError::Internal(e.to_string())
        })
    }
}
