use async_trait::async_trait;
use serde_json::Value;

use folio_core::DomainError;
use folio_core::domain::{NewProject, Project, ProjectChanges, THUMBNAIL_MAX_LEN};
use folio_shared::dto::ProjectResponse;

use super::Serializer;
use super::fields::Payload;

pub struct ProjectSerializer;

impl ProjectSerializer {
    fn read(payload: &mut Payload<'_>) -> ProjectChanges {
        ProjectChanges {
            title: payload.text("title", Some(Project::TITLE_MAX_LEN)),
            description: payload.text("description", None),
            thumbnail: payload.text("thumbnail", Some(THUMBNAIL_MAX_LEN)),
        }
    }
}

#[async_trait]
impl Serializer for ProjectSerializer {
    type Record = Project;
    type Output = ProjectResponse;

    fn to_representation(&self, project: &Project) -> ProjectResponse {
        ProjectResponse {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            timestamp: project.created_at,
            thumbnail: project.thumbnail.clone(),
        }
    }

    async fn validate_create(&self, data: &Value) -> Result<NewProject, DomainError> {
        let mut payload = Payload::new(data, false)?;
        let fields = Self::read(&mut payload);
        payload.finish()?;

        Ok(NewProject {
            title: fields.title.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            thumbnail: fields.thumbnail.unwrap_or_default(),
        })
    }

    async fn validate_update(
        &self,
        _instance: &Project,
        data: &Value,
        partial: bool,
    ) -> Result<ProjectChanges, DomainError> {
        let mut payload = Payload::new(data, partial)?;
        let changes = Self::read(&mut payload);
        payload.finish()?;
        Ok(changes)
    }
}
