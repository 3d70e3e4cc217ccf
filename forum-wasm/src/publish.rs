use crate::Post;
use crate::client::{ForumClientTrait, NewPostRequest};
use crate::draft::Draft;
use crate::error::ForumClientError;

/// An attachment selected in the form but not yet resolved to a URL.
pub struct PendingUpload {
    pub key: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Publish a draft: validate, resolve the optional attachment, then issue
/// exactly one document insert. Attachment readiness and field readiness
/// are independent inputs; an attachment already resolved to a URL is
/// passed in on the draft and not uploaded again, and any failure along
/// the way surfaces as an error instead of silently stopping the chain.
pub async fn publish<C: ForumClientTrait>(
    client: &C,
    mut draft: Draft,
    pending: Option<PendingUpload>,
) -> Result<Post, ForumClientError> {
    draft.validate().map_err(ForumClientError::Validation)?;

    if let Some(upload) = pending {
        let url = client
            .upload_image(&upload.key, upload.bytes, &upload.content_type)
            .await?;
        draft.img_url = url;
    }

    client.create_post(NewPostRequest::from(draft)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{PostType, REQUIRED_FIELDS_MESSAGE};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::cell::RefCell;
    use uuid::Uuid;

    #[derive(Default)]
    struct MockClient {
        uploads: RefCell<Vec<String>>,
        inserts: RefCell<Vec<NewPostRequest>>,
        fail_upload: bool,
    }

    #[async_trait(?Send)]
    impl ForumClientTrait for MockClient {
        async fn upload_image(
            &self,
            key: &str,
            _bytes: Vec<u8>,
            _content_type: &str,
        ) -> Result<String, ForumClientError> {
            if self.fail_upload {
                return Err(ForumClientError::Http {
                    status: 500,
                    message: "storage unavailable".into(),
                });
            }
            self.uploads.borrow_mut().push(key.to_string());
            Ok(format!("http://media.test/{}", key))
        }

        async fn create_post(
            &self,
            new_post: NewPostRequest,
        ) -> Result<Post, ForumClientError> {
            self.inserts.borrow_mut().push(new_post.clone());
            Ok(Post {
                id: Uuid::new_v4(),
                post_type: new_post.post_type,
                title: new_post.title,
                content: new_post.content,
                tags: new_post.tags,
                abstract_text: new_post.abstract_text,
                img_url: new_post.img_url,
                created_at: Some(Utc::now()),
            })
        }

        async fn list_posts(
            &self,
            _limit: Option<u32>,
            _offset: Option<u32>,
        ) -> Result<Vec<Post>, ForumClientError> {
            unreachable!("publish never lists posts")
        }

        async fn get_post_by_id(&self, _id: Uuid) -> Result<Post, ForumClientError> {
            unreachable!("publish never fetches posts")
        }
    }

    fn question() -> Draft {
        Draft {
            post_type: PostType::Question,
            title: "How to center a div".into(),
            content: "Using flex".into(),
            tags: "css,flexbox".into(),
            ..Draft::default()
        }
    }

    fn article_with_image() -> (Draft, PendingUpload) {
        let draft = Draft {
            post_type: PostType::Article,
            title: "Centering in 2024".into(),
            content: "Long form text".into(),
            abstract_text: "A short overview".into(),
            ..Draft::default()
        };
        let pending = PendingUpload {
            key: "1700000000000cat.png".into(),
            bytes: b"png bytes".to_vec(),
            content_type: "image/png".into(),
        };
        (draft, pending)
    }

    #[test]
    fn question_without_attachment_inserts_once_and_never_uploads() {
        let client = MockClient::default();

        let post = futures::executor::block_on(publish(&client, question(), None)).unwrap();

        assert!(client.uploads.borrow().is_empty());
        assert_eq!(client.inserts.borrow().len(), 1);
        assert_eq!(post.title, "How to center a div");
        assert!(post.img_url.is_empty());
        assert!(post.created_at.is_some());
    }

    #[test]
    fn invalid_draft_aborts_before_any_remote_call() {
        let client = MockClient::default();
        let mut draft = question();
        draft.tags.clear();

        let result = futures::executor::block_on(publish(&client, draft, None));

        assert!(matches!(
            result,
            Err(ForumClientError::Validation(msg)) if msg == REQUIRED_FIELDS_MESSAGE
        ));
        assert!(client.uploads.borrow().is_empty());
        assert!(client.inserts.borrow().is_empty());
    }

    #[test]
    fn upload_resolution_feeds_the_single_insert() {
        let client = MockClient::default();
        let (draft, pending) = article_with_image();

        let post = futures::executor::block_on(publish(&client, draft, Some(pending))).unwrap();

        assert_eq!(client.uploads.borrow().len(), 1);
        assert_eq!(client.inserts.borrow().len(), 1);
        assert_eq!(post.img_url, "http://media.test/1700000000000cat.png");
        assert_eq!(
            client.inserts.borrow()[0].img_url,
            "http://media.test/1700000000000cat.png"
        );
    }

    #[test]
    fn failed_upload_surfaces_and_blocks_the_insert() {
        let client = MockClient {
            fail_upload: true,
            ..MockClient::default()
        };
        let (draft, pending) = article_with_image();

        let result = futures::executor::block_on(publish(&client, draft, Some(pending)));

        assert!(matches!(result, Err(ForumClientError::Http { status: 500, .. })));
        assert!(client.inserts.borrow().is_empty());
    }

    #[test]
    fn already_resolved_attachment_is_not_uploaded_again() {
        let client = MockClient::default();
        let mut draft = question();
        draft.img_url = "http://media.test/existing.png".into();

        let post = futures::executor::block_on(publish(&client, draft, None)).unwrap();

        assert!(client.uploads.borrow().is_empty());
        assert_eq!(post.img_url, "http://media.test/existing.png");
    }
}
