use async_trait::async_trait;
use serde_json::Value;

use folio_core::DomainError;
use folio_core::domain::{Author, AuthorChanges, NewAuthor, THUMBNAIL_MAX_LEN};
use folio_shared::dto::AuthorResponse;

use super::Serializer;
use super::fields::Payload;

pub struct AuthorSerializer;

impl AuthorSerializer {
    fn read(payload: &mut Payload<'_>) -> AuthorChanges {
        AuthorChanges {
            fullname: payload.text("fullname", Some(Author::FULLNAME_MAX_LEN)),
            description: payload.text("description", None),
            thumbnail: payload.text("thumbnail", Some(THUMBNAIL_MAX_LEN)),
        }
    }
}

/// Shared by the post serializer, which nests authors.
pub(crate) fn author_response(author: &Author) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        fullname: author.fullname.clone(),
        description: author.description.clone(),
        thumbnail: author.thumbnail.clone(),
        timestamp: author.created_at,
    }
}

#[async_trait]
impl Serializer for AuthorSerializer {
    type Record = Author;
    type Output = AuthorResponse;

    fn to_representation(&self, author: &Author) -> AuthorResponse {
        author_response(author)
    }

    async fn validate_create(&self, data: &Value) -> Result<NewAuthor, DomainError> {
        let mut payload = Payload::new(data, false)?;
        let fields = Self::read(&mut payload);
        payload.finish()?;

        Ok(NewAuthor {
            fullname: fields.fullname.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            thumbnail: fields.thumbnail.unwrap_or_default(),
        })
    }

    async fn validate_update(
        &self,
        _instance: &Author,
        data: &Value,
        partial: bool,
    ) -> Result<AuthorChanges, DomainError> {
        let mut payload = Payload::new(data, partial)?;
        let changes = Self::read(&mut payload);
        payload.finish()?;
        Ok(changes)
    }
}
