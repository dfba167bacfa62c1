//! Access policies evaluated before a handler touches data.
//!
//! A policy answers two questions: may this principal issue this method at
//! all, and may it issue it against this particular record. Both default to
//! allow, so each policy only spells out the check it cares about.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::ports::TokenClaims;

/// Role granting write access under [`IsAdminOrReadOnly`].
pub const ADMIN_ROLE: &str = "admin";

/// HTTP methods the content routes understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Options,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Read-only methods: GET, HEAD, OPTIONS.
    pub fn is_safe(self) -> bool {
        matches!(self, Method::Get | Method::Head | Method::Options)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported method: {0}")]
pub struct UnsupportedMethod(pub String);

impl FromStr for Method {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(UnsupportedMethod(other.to_string())),
        }
    }
}

/// The actor making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    User {
        id: Uuid,
        email: String,
        is_admin: bool,
    },
}

impl Principal {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::User { .. })
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::User { is_admin: true, .. })
    }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Principal::User { id, .. } => Some(*id),
            Principal::Anonymous => None,
        }
    }
}

impl From<TokenClaims> for Principal {
    fn from(claims: TokenClaims) -> Self {
        let is_admin = claims.has_role(ADMIN_ROLE);
        Principal::User {
            id: claims.user_id,
            email: claims.email,
            is_admin,
        }
    }
}

/// Records owned by a single principal.
pub trait Ownable {
    fn owner_id(&self) -> Uuid;
}

/// An access policy for records of type `T`.
pub trait Permission<T>: Send + Sync {
    fn has_permission(&self, _method: Method, _principal: &Principal) -> bool {
        true
    }

    fn has_object_permission(&self, _method: Method, _principal: &Principal, _object: &T) -> bool {
        true
    }
}

/// Only safe methods, regardless of who asks.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsReadOnly;

impl<T> Permission<T> for IsReadOnly {
    fn has_permission(&self, method: Method, _principal: &Principal) -> bool {
        method.is_safe()
    }
}

/// Anyone may read; only administrators may write.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAdminOrReadOnly;

impl<T> Permission<T> for IsAdminOrReadOnly {
    fn has_permission(&self, method: Method, principal: &Principal) -> bool {
        method.is_safe() || principal.is_admin()
    }
}

/// Anyone may read; any authenticated principal may write.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAuthenticatedOrReadOnly;

impl<T> Permission<T> for IsAuthenticatedOrReadOnly {
    fn has_permission(&self, method: Method, principal: &Principal) -> bool {
        method.is_safe() || principal.is_authenticated()
    }
}

/// Anyone may read; only the record's owner may change it.
///
/// Only usable with record types implementing [`Ownable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IsOwnerOrReadOnly;

impl<T: Ownable> Permission<T> for IsOwnerOrReadOnly {
    fn has_object_permission(&self, method: Method, principal: &Principal, object: &T) -> bool {
        method.is_safe() || principal.user_id() == Some(object.owner_id())
    }
}
