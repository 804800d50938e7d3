//! Domain layer for photodeck.
//!
//! Value types shared by the dispatcher, the service layer and the view models.
//! Nothing here performs I/O.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`selection`]: Selected items and their media tag
//! - [`route`]: Route context and album reference
//! - [`photo`]: Photo detail, people and similar photos

pub mod error;
pub mod photo;
pub mod route;
pub mod selection;

pub use error::{PhotodeckError, Result};
pub use photo::{FaceLocation, Person, PersonKind, PhotoDetail, SimilarPhoto, UNKNOWN_PERSON_LABEL};
pub use route::{AlbumRef, RouteContext, RouteKind, PERSON_PREFIX, USER_ALBUM_PREFIX};
pub use selection::{item_ids, ItemKind, SelectedItem};
