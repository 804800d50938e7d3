//! Route context passed explicitly into the dispatcher.
//!
//! The route is the current application path supplied by the host router. Album
//! scoped actions are gated on its prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path prefix of a person page.
pub const PERSON_PREFIX: &str = "/person/";

/// Path prefix of a user album page.
pub const USER_ALBUM_PREFIX: &str = "/useralbum/";

/// Classification of a route by prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// `/person/...`
    Person,
    /// `/useralbum/...`
    UserAlbum,
    /// Anything else.
    Other,
}

/// The current navigable path.
///
/// # Examples
///
/// ```
/// use photodeck::{RouteContext, RouteKind};
///
/// assert_eq!(RouteContext::new("/useralbum/12").kind(), RouteKind::UserAlbum);
/// assert_eq!(RouteContext::new("/person/4").kind(), RouteKind::Person);
/// assert_eq!(RouteContext::new("/").kind(), RouteKind::Other);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteContext(String);

impl RouteContext {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn kind(&self) -> RouteKind {
        if self.0.starts_with(PERSON_PREFIX) {
            RouteKind::Person
        } else if self.0.starts_with(USER_ALBUM_PREFIX) {
            RouteKind::UserAlbum
        } else {
            RouteKind::Other
        }
    }

    #[must_use]
    pub fn is_user_album(&self) -> bool {
        self.kind() == RouteKind::UserAlbum
    }
}

impl fmt::Display for RouteContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The user album a selection is being acted upon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: u64,
    pub title: String,
}

impl AlbumRef {
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self { id, title: title.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_must_include_trailing_slash() {
        assert_eq!(RouteContext::new("/person").kind(), RouteKind::Other);
        assert_eq!(RouteContext::new("/useralbums/").kind(), RouteKind::Other);
        assert_eq!(RouteContext::new("/useralbum/").kind(), RouteKind::UserAlbum);
    }

    #[test]
    fn nested_prefix_is_not_matched() {
        assert_eq!(RouteContext::new("/search/person/1").kind(), RouteKind::Other);
    }
}
