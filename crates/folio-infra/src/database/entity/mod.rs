//! SeaORM entities for the content tables.

pub mod about;
pub mod author;
pub mod feature;
pub mod post;
pub mod project;
