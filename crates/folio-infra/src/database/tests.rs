use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use folio_core::RepoError;
use folio_core::domain::{NewPost, ProjectChanges};
use folio_core::ports::Repository;

use super::{
    PostgresAboutRepository, PostgresAuthorRepository, PostgresFeatureRepository,
    PostgresPostRepository, PostgresProjectRepository,
};
use super::entity::{author, feature, post, project};

fn author_row(id: i32, fullname: &str) -> author::Model {
    author::Model {
        id,
        fullname: fullname.to_owned(),
        description: "bio".to_owned(),
        thumbnail: "authors/thumbnails/a.png".to_owned(),
        created_at: Utc::now().into(),
    }
}

fn post_row(id: i32, slug: &str, author_id: i32) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "Title".to_owned(),
        slug: slug.to_owned(),
        description: "body".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
        author_id,
    }
}

#[tokio::test]
async fn lists_features_from_rows() {
    let now = Utc::now();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            feature::Model {
                id: 2,
                name: "Consulting".to_owned(),
                title: "We consult".to_owned(),
                url: "https://example.com/consulting".to_owned(),
                created_at: now.into(),
            },
            feature::Model {
                id: 1,
                name: "Design".to_owned(),
                title: "We design".to_owned(),
                url: "https://example.com/design".to_owned(),
                created_at: now.into(),
            },
        ]])
        .into_connection();

    let features = PostgresFeatureRepository::new(Arc::new(db)).list().await.unwrap();

    assert_eq!(features.len(), 2);
    assert_eq!(features[0].id, 2);
    assert_eq!(features[1].name, "Design");
}

#[tokio::test]
async fn finds_author_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![author_row(1, "Ada")]])
        .into_connection();

    let author = PostgresAuthorRepository::new(Arc::new(db)).get(&1).await.unwrap();

    assert_eq!(author.unwrap().fullname, "Ada");
}

#[tokio::test]
async fn deleting_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let result = PostgresAboutRepository::new(Arc::new(db)).delete(&5).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn empty_change_set_skips_the_update_query() {
    let row = project::Model {
        id: 3,
        title: "Portfolio".to_owned(),
        description: "desc".to_owned(),
        created_at: Utc::now().into(),
        thumbnail: "projects/thumbnails/p.png".to_owned(),
    };
    // Only the lookup is mocked; an UPDATE would exhaust the mock and fail.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let project = PostgresProjectRepository::new(Arc::new(db))
        .update(&3, ProjectChanges::default())
        .await
        .unwrap();

    assert_eq!(project.title, "Portfolio");
}

#[tokio::test]
async fn post_lookup_joins_author() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![(post_row(7, "hello", 1), author_row(1, "Ada"))]])
        .into_connection();

    let post = PostgresPostRepository::new(Arc::new(db))
        .get(&"hello".to_string())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(post.id, 7);
    assert_eq!(post.slug, "hello");
    assert_eq!(post.author.fullname, "Ada");
}

#[tokio::test]
async fn created_post_carries_its_author() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_row(1, "t", 1)]])
        .append_query_results([vec![author_row(1, "A")]])
        .into_connection();

    let post = PostgresPostRepository::new(Arc::new(db))
        .create(NewPost {
            title: "Title".to_owned(),
            slug: "t".to_owned(),
            description: "body".to_owned(),
            author_id: 1,
        })
        .await
        .unwrap();

    assert_eq!(post.author_id(), 1);
    assert_eq!(post.author.fullname, "A");
}

#[tokio::test]
async fn repositories_share_one_connection() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![author_row(1, "Ada")]])
            .append_query_results([vec![post_row(4, "shared", 1)]])
            .append_query_results([vec![author_row(1, "Ada")]])
            .into_connection(),
    );
    let authors = PostgresAuthorRepository::new(db.clone());
    let posts = PostgresPostRepository::new(db.clone());

    let author = authors.get(&1).await.unwrap().unwrap();
    let post = posts
        .create(NewPost {
            title: "Shared".to_owned(),
            slug: "shared".to_owned(),
            description: "body".to_owned(),
            author_id: author.id,
        })
        .await
        .unwrap();

    assert_eq!(post.author.id, author.id);
    assert_eq!(post.author.fullname, "Ada");
    assert_eq!(Arc::strong_count(&db), 3);
}
