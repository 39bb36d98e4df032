use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    async fn find_owned(&self, author: &UserId, id: &PostId) -> Result<Post, PostError> {
        let post = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound)?;

        if !post.is_authored_by(author) {
            return Err(PostError::Forbidden);
        }

        Ok(post)
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        author: &UserId,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            author_id: *author,
            content: command.content,
            created_at: now,
            updated_at: now,
        };

        let created_post = self.repository.create(post).await?;
        tracing::debug!(post_id = %created_post.id, author_id = %author, "Post created");

        Ok(created_post)
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound)
    }

    async fn update_post(
        &self,
        author: &UserId,
        id: &PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        let mut post = self.find_owned(author, id).await?;

        post.content = command.content;
        post.updated_at = Utc::now();

        self.repository.update(post).await
    }

    async fn delete_post(&self, author: &UserId, id: &PostId) -> Result<(), PostError> {
        self.find_owned(author, id).await?;
        self.repository.delete(id).await?;

        tracing::debug!(post_id = %id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::post::models::PostContent;

    mock! {
        pub TestPostRepository {}

        #[async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(&self, post: Post) -> Result<Post, PostError>;
            async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;
            async fn update(&self, post: Post) -> Result<Post, PostError>;
            async fn delete(&self, id: &PostId) -> Result<(), PostError>;
        }
    }

    fn existing_post(author: UserId) -> Post {
        let now = Utc::now();
        Post {
            id: PostId::new(),
            author_id: author,
            content: PostContent::new("first post".to_string()).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_post_success() {
        let mut repository = MockTestPostRepository::new();
        let author = UserId::new();

        repository
            .expect_create()
            .withf(move |post| post.author_id == author && post.content.as_str() == "hello")
            .times(1)
            .returning(|post| Ok(post));

        let service = PostService::new(Arc::new(repository));

        let post = service
            .create_post(
                &author,
                CreatePostCommand {
                    content: PostContent::new("hello".to_string()).unwrap(),
                },
            )
            .await
            .unwrap();
        assert_eq!(post.author_id, author);
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = PostService::new(Arc::new(repository));

        let err = service.get_post(&PostId::new()).await.unwrap_err();
        assert!(matches!(err, PostError::NotFound));
        assert_eq!(err.to_string(), "post not found");
    }

    #[tokio::test]
    async fn test_update_post_by_author() {
        let mut repository = MockTestPostRepository::new();
        let author = UserId::new();
        let post = existing_post(author);
        let post_id = post.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(post.clone())));
        repository
            .expect_update()
            .withf(|post| post.content.as_str() == "edited")
            .times(1)
            .returning(|post| Ok(post));

        let service = PostService::new(Arc::new(repository));

        let updated = service
            .update_post(
                &author,
                &post_id,
                UpdatePostCommand {
                    content: PostContent::new("edited".to_string()).unwrap(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.content.as_str(), "edited");
    }

    #[tokio::test]
    async fn test_update_post_by_other_user_is_forbidden() {
        let mut repository = MockTestPostRepository::new();
        let post = existing_post(UserId::new());
        let post_id = post.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(post.clone())));
        repository.expect_update().times(0);

        let service = PostService::new(Arc::new(repository));

        let err = service
            .update_post(
                &UserId::new(),
                &post_id,
                UpdatePostCommand {
                    content: PostContent::new("hijacked".to_string()).unwrap(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PostError::Forbidden));
        assert_eq!(err.to_string(), "forbidden");
    }

    #[tokio::test]
    async fn test_delete_post_by_author() {
        let mut repository = MockTestPostRepository::new();
        let author = UserId::new();
        let post = existing_post(author);
        let post_id = post.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(post.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == post_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = PostService::new(Arc::new(repository));

        assert!(service.delete_post(&author, &post_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_post_by_other_user_is_forbidden() {
        let mut repository = MockTestPostRepository::new();
        let post = existing_post(UserId::new());
        let post_id = post.id;

        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(post.clone())));
        repository.expect_delete().times(0);

        let service = PostService::new(Arc::new(repository));

        let result = service.delete_post(&UserId::new(), &post_id).await;
        assert!(matches!(result.unwrap_err(), PostError::Forbidden));
    }

    #[tokio::test]
    async fn test_delete_post_not_found() {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = PostService::new(Arc::new(repository));

        let result = service.delete_post(&UserId::new(), &PostId::new()).await;
        assert!(matches!(result.unwrap_err(), PostError::NotFound));
    }
}
