//! # Folio Core
//!
//! The domain layer of the Folio content API.
//! Records, access policies, and the storage port live here with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod permission;
pub mod ports;

pub use domain::Record;
pub use error::{DomainError, RepoError, ValidationErrors};
pub use permission::{Method, Permission, Principal};
