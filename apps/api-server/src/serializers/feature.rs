use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use folio_core::DomainError;
use folio_core::domain::{Feature, FeatureChanges, NewFeature};
use folio_shared::dto::FeatureResponse;

use super::Serializer;
use super::fields::{INVALID_URL, Payload};

const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

pub struct FeatureSerializer;

fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => URL_SCHEMES.contains(&url.scheme()) && url.host_str().is_some(),
        Err(_) => false,
    }
}

impl FeatureSerializer {
    fn read(payload: &mut Payload<'_>) -> FeatureChanges {
        let name = payload.text("name", Some(Feature::NAME_MAX_LEN));
        let title = payload.text("title", Some(Feature::TITLE_MAX_LEN));
        let mut url = payload.text("url", Some(Feature::URL_MAX_LEN));

        if url.as_deref().is_some_and(|u| !is_valid_url(u)) {
            payload.add_error("url", INVALID_URL);
            url = None;
        }

        FeatureChanges { name, title, url }
    }
}

#[async_trait]
impl Serializer for FeatureSerializer {
    type Record = Feature;
    type Output = FeatureResponse;

    fn to_representation(&self, feature: &Feature) -> FeatureResponse {
        FeatureResponse {
            id: feature.id,
            name: feature.name.clone(),
            title: feature.title.clone(),
            url: feature.url.clone(),
            timestamp: feature.created_at,
        }
    }

    async fn validate_create(&self, data: &Value) -> Result<NewFeature, DomainError> {
        let mut payload = Payload::new(data, false)?;
        let fields = Self::read(&mut payload);
        payload.finish()?;

        Ok(NewFeature {
            name: fields.name.unwrap_or_default(),
            title: fields.title.unwrap_or_default(),
            url: fields.url.unwrap_or_default(),
        })
    }

    async fn validate_update(
        &self,
        _instance: &Feature,
        data: &Value,
        partial: bool,
    ) -> Result<FeatureChanges, DomainError> {
        let mut payload = Payload::new(data, partial)?;
        let changes = Self::read(&mut payload);
        payload.finish()?;
        Ok(changes)
    }
}
