//! Serializers - translate between stored records and JSON bodies.
//!
//! A serializer renders a record for responses and validates request bodies
//! into the record's draft (create) or change set (update).

mod about;
mod author;
mod feature;
mod fields;
mod post;
mod project;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use folio_core::{DomainError, Record};

pub use about::AboutSerializer;
pub use author::AuthorSerializer;
pub use feature::FeatureSerializer;
pub use post::PostSerializer;
pub use project::ProjectSerializer;

type Draft<S> = <<S as Serializer>::Record as Record>::Draft;
type Changes<S> = <<S as Serializer>::Record as Record>::Changes;

#[async_trait]
pub trait Serializer: Send + Sync + 'static {
    type Record: Record;
    type Output: Serialize + Send;

    fn to_representation(&self, record: &Self::Record) -> Self::Output;

    /// Validate a body for a new record. Every field is required.
    async fn validate_create(&self, data: &Value) -> Result<Draft<Self>, DomainError>;

    /// Validate a body updating `instance`. With `partial` set, absent fields
    /// are left untouched; otherwise every field is required.
    async fn validate_update(
        &self,
        instance: &Self::Record,
        data: &Value,
        partial: bool,
    ) -> Result<Changes<Self>, DomainError>;
}
