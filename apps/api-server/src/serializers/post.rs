use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use folio_core::DomainError;
use folio_core::domain::{NewPost, Post, PostChanges, is_valid_slug};
use folio_core::ports::{AuthorRepository, PostRepository};
use folio_shared::dto::PostResponse;

use super::Serializer;
use super::author::author_response;
use super::fields::{INVALID_SLUG, Payload};

/// Posts reference an author by id and are addressed by a unique slug, so
/// validation needs to look at what is already stored.
pub struct PostSerializer {
    authors: Arc<AuthorRepository>,
    posts: Arc<PostRepository>,
}

impl PostSerializer {
    pub fn new(authors: Arc<AuthorRepository>, posts: Arc<PostRepository>) -> Self {
        Self { authors, posts }
    }

    async fn read(
        &self,
        payload: &mut Payload<'_>,
        instance: Option<&Post>,
    ) -> Result<PostChanges, DomainError> {
        let title = payload.text("title", Some(Post::TITLE_MAX_LEN));
        let mut slug = payload.text("slug", Some(Post::SLUG_MAX_LEN));
        let description = payload.text("description", None);
        let mut author_id = payload.pk("author_id");

        if let Some(candidate) = slug.take() {
            slug = self.check_slug(payload, candidate, instance).await?;
        }
        if let Some(id) = author_id.take() {
            if self.authors.get(&id).await?.is_some() {
                author_id = Some(id);
            } else {
                payload.add_error(
                    "author_id",
                    format!("Invalid pk \"{id}\" - object does not exist."),
                );
            }
        }

        Ok(PostChanges {
            title,
            slug,
            description,
            author_id,
        })
    }

    async fn check_slug(
        &self,
        payload: &mut Payload<'_>,
        candidate: String,
        instance: Option<&Post>,
    ) -> Result<Option<String>, DomainError> {
        if !is_valid_slug(&candidate) {
            payload.add_error("slug", INVALID_SLUG);
            return Ok(None);
        }

        let unchanged = instance.is_some_and(|post| post.slug == candidate);
        if !unchanged && self.posts.get(&candidate).await?.is_some() {
            payload.add_error("slug", "post with this slug already exists.");
            return Ok(None);
        }

        Ok(Some(candidate))
    }
}

#[async_trait]
impl Serializer for PostSerializer {
    type Record = Post;
    type Output = PostResponse;

    fn to_representation(&self, post: &Post) -> PostResponse {
        PostResponse {
            id: post.id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            description: post.description.clone(),
            timestamp: post.created_at,
            last_updated: post.updated_at,
            author: author_response(&post.author),
        }
    }

    async fn validate_create(&self, data: &Value) -> Result<NewPost, DomainError> {
        let mut payload = Payload::new(data, false)?;
        let fields = self.read(&mut payload, None).await?;
        payload.finish()?;

        Ok(NewPost {
            title: fields.title.unwrap_or_default(),
            slug: fields.slug.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            author_id: fields.author_id.unwrap_or_default(),
        })
    }

    async fn validate_update(
        &self,
        instance: &Post,
        data: &Value,
        partial: bool,
    ) -> Result<PostChanges, DomainError> {
        let mut payload = Payload::new(data, partial)?;
        let changes = self.read(&mut payload, Some(instance)).await?;
        payload.finish()?;
        Ok(changes)
    }
}
