mod common;

use chrono::Utc;
use common::TestDb;
use social_service::domain::follower::errors::FollowerError;
use social_service::domain::follower::ports::FollowerRepository;
use social_service::domain::post::errors::PostError;
use social_service::domain::post::models::Post;
use social_service::domain::post::models::PostContent;
use social_service::domain::post::models::PostId;
use social_service::domain::post::ports::PostRepository;
use social_service::domain::user::models::Bio;
use social_service::domain::user::models::Birthday;
use social_service::domain::user::models::EmailAddress;
use social_service::domain::user::models::User;
use social_service::domain::user::models::UserId;
use social_service::domain::user::models::Username;
use social_service::domain::user::ports::UserRepository;
use social_service::outbound::repositories::follower::PostgresFollowerRepository;
use social_service::outbound::repositories::post::PostgresPostRepository;
use social_service::outbound::repositories::user::PostgresUserRepository;
use social_service::user::errors::UserError;

fn new_user(username: &str, email: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        username: Username::new(username.to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        bio: None,
        birthday: None,
        created_at: now,
        updated_at: now,
    }
}

macro_rules! test_db_or_skip {
    () => {
        match TestDb::new().await {
            Some(db) => db,
            None => {
                eprintln!("DATABASE_URL not set, skipping");
                return;
            }
        }
    };
}

#[tokio::test]
async fn test_user_create_and_find() {
    let db = test_db_or_skip!();
    let repository = PostgresUserRepository::new(db.pool.clone());

    let user = new_user("alice", "a@x.com");
    repository.create(user.clone()).await.unwrap();

    let by_id = repository.find_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(by_id.username.as_str(), "alice");

    let by_email = repository
        .find_by_email(&EmailAddress::new("a@x.com".to_string()).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, user.id);

    let missing = repository
        .find_by_email(&EmailAddress::new("nobody@x.com".to_string()).unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());

    db.cleanup().await;
}

#[tokio::test]
async fn test_user_unique_constraints() {
    let db = test_db_or_skip!();
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository.create(new_user("alice", "a@x.com")).await.unwrap();

    let same_email = repository.create(new_user("alice2", "a@x.com")).await;
    assert!(matches!(
        same_email.unwrap_err(),
        UserError::EmailAlreadyExists(_)
    ));

    let same_username = repository.create(new_user("alice", "other@x.com")).await;
    assert!(matches!(
        same_username.unwrap_err(),
        UserError::UsernameAlreadyExists(_)
    ));

    db.cleanup().await;
}

#[tokio::test]
async fn test_user_update_profile_fields() {
    let db = test_db_or_skip!();
    let repository = PostgresUserRepository::new(db.pool.clone());

    let mut user = repository.create(new_user("alice", "a@x.com")).await.unwrap();
    user.bio = Some(Bio::new("Software Engineer".to_string()).unwrap());
    user.birthday = Some(Birthday::parse("2006-01-02").unwrap());
    repository.update(user.clone()).await.unwrap();

    let stored = repository.find_by_id(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.bio.unwrap().as_str(), "Software Engineer");
    assert_eq!(stored.birthday.unwrap().to_string(), "2006-01-02");

    let ghost = new_user("ghost", "g@x.com");
    assert!(matches!(
        repository.update(ghost).await.unwrap_err(),
        UserError::NotFound(_)
    ));

    db.cleanup().await;
}

#[tokio::test]
async fn test_post_crud() {
    let db = test_db_or_skip!();
    let users = PostgresUserRepository::new(db.pool.clone());
    let posts = PostgresPostRepository::new(db.pool.clone());

    let author = users.create(new_user("alice", "a@x.com")).await.unwrap();
    let now = Utc::now();
    let post = Post {
        id: PostId::new(),
        author_id: author.id,
        content: PostContent::new("hello".to_string()).unwrap(),
        created_at: now,
        updated_at: now,
    };

    posts.create(post.clone()).await.unwrap();
    let stored = posts.find_by_id(&post.id).await.unwrap().unwrap();
    assert_eq!(stored.content.as_str(), "hello");
    assert_eq!(stored.author_id, author.id);

    let mut edited = stored.clone();
    edited.content = PostContent::new("edited".to_string()).unwrap();
    posts.update(edited).await.unwrap();
    let stored = posts.find_by_id(&post.id).await.unwrap().unwrap();
    assert_eq!(stored.content.as_str(), "edited");

    posts.delete(&post.id).await.unwrap();
    assert!(posts.find_by_id(&post.id).await.unwrap().is_none());
    assert!(matches!(
        posts.delete(&post.id).await.unwrap_err(),
        PostError::NotFound
    ));

    db.cleanup().await;
}

#[tokio::test]
async fn test_follow_relationships() {
    let db = test_db_or_skip!();
    let users = PostgresUserRepository::new(db.pool.clone());
    let followers = PostgresFollowerRepository::new(db.pool.clone());

    let alice = users.create(new_user("alice", "a@x.com")).await.unwrap();
    let bob = users.create(new_user("bob", "b@x.com")).await.unwrap();

    followers.follow(&alice.id, &bob.id).await.unwrap();
    followers.follow(&alice.id, &bob.id).await.unwrap();

    let bob_followers = followers.find_followers(&bob.id).await.unwrap();
    assert_eq!(bob_followers.len(), 1);
    assert_eq!(bob_followers[0].id, alice.id);

    let alice_following = followers.find_following(&alice.id).await.unwrap();
    assert_eq!(alice_following.len(), 1);
    assert_eq!(alice_following[0].id, bob.id);

    followers.unfollow(&alice.id, &bob.id).await.unwrap();
    assert!(matches!(
        followers.unfollow(&alice.id, &bob.id).await.unwrap_err(),
        FollowerError::RelationshipNotFound
    ));

    assert!(matches!(
        followers.follow(&alice.id, &UserId::new()).await.unwrap_err(),
        FollowerError::UserNotFound
    ));

    db.cleanup().await;
}
