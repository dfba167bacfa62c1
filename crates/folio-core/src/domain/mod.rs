//! Domain entities - the core content records.

mod about;
mod author;
mod feature;
mod post;
mod project;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

pub use about::{About, AboutChanges, NewAbout};
pub use author::{Author, AuthorChanges, AuthorId, NewAuthor};
pub use feature::{Feature, FeatureChanges, NewFeature};
pub use post::{NewPost, Post, PostChanges, is_valid_slug};
pub use project::{NewProject, Project, ProjectChanges};

/// Database-assigned identifier shared by every record type.
pub type RecordId = i32;

/// Longest stored image reference.
pub const THUMBNAIL_MAX_LEN: usize = 100;

/// A persisted content record.
///
/// Ties a record type to the key its detail routes are addressed by and to the
/// validated payloads used to create and change it.
pub trait Record: Clone + Send + Sync + 'static {
    /// Value identifying a single record in detail routes.
    type Key: Clone + fmt::Display + FromStr + Send + Sync + 'static;
    /// Validated data for a new record.
    type Draft: Send + 'static;
    /// Validated set of field changes; `None` leaves a field untouched.
    type Changes: Send + 'static;

    /// Human readable entity name used in messages and logs.
    const ENTITY: &'static str;
    /// Name of the field `Key` is drawn from.
    const LOOKUP_FIELD: &'static str;

    fn id(&self) -> RecordId;

    fn lookup_key(&self) -> Self::Key;

    fn created_at(&self) -> DateTime<Utc>;
}

/// Sort records newest first, ties broken by descending id.
pub fn newest_first<R: Record>(records: &mut [R]) {
    records.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}
