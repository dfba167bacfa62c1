use async_trait::async_trait;
use serde_json::Value;

use folio_core::DomainError;
use folio_core::domain::{About, AboutChanges, NewAbout, THUMBNAIL_MAX_LEN};
use folio_shared::dto::AboutResponse;

use super::Serializer;
use super::fields::Payload;

pub struct AboutSerializer;

impl AboutSerializer {
    fn read(payload: &mut Payload<'_>) -> AboutChanges {
        AboutChanges {
            title: payload.text("title", Some(About::TITLE_MAX_LEN)),
            description: payload.text("description", None),
            mission: payload.text("mission", None),
            thumbnail: payload.text("thumbnail", Some(THUMBNAIL_MAX_LEN)),
        }
    }
}

#[async_trait]
impl Serializer for AboutSerializer {
    type Record = About;
    type Output = AboutResponse;

    fn to_representation(&self, about: &About) -> AboutResponse {
        AboutResponse {
            id: about.id,
            title: about.title.clone(),
            description: about.description.clone(),
            mission: about.mission.clone(),
            timestamp: about.created_at,
            thumbnail: about.thumbnail.clone(),
        }
    }

    async fn validate_create(&self, data: &Value) -> Result<NewAbout, DomainError> {
        let mut payload = Payload::new(data, false)?;
        let fields = Self::read(&mut payload);
        payload.finish()?;

        Ok(NewAbout {
            title: fields.title.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            mission: fields.mission.unwrap_or_default(),
            thumbnail: fields.thumbnail.unwrap_or_default(),
        })
    }

    async fn validate_update(
        &self,
        _instance: &About,
        data: &Value,
        partial: bool,
    ) -> Result<AboutChanges, DomainError> {
        let mut payload = Payload::new(data, partial)?;
        let changes = Self::read(&mut payload);
        payload.finish()?;
        Ok(changes)
    }
}
