//! Effects representing side effects to be executed by the runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Effect>` and the
//! [`Runtime`](crate::runtime::Runtime) executes them: mutation requests go to
//! the background worker, clipboard text to the clipboard, and everything else
//! to the parent's callbacks.

use crate::domain::FaceLocation;
use crate::service::MutationRequest;
use std::fmt;

/// Which page kind an album cover is being set for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlbumCoverKind {
    Person,
    UserAlbum,
}

impl AlbumCoverKind {
    /// Tag passed to the parent's album cover callback.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::UserAlbum => "useralbum",
        }
    }
}

impl fmt::Display for AlbumCoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flows owned by the parent component. This crate only decides when they run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentCallback {
    /// Open the add-to-album dialog.
    AddToAlbum,
    /// Open the share-photos dialog.
    SharePhotos,
    /// Open the share-album dialog.
    ShareAlbum,
    /// Use the single selected item as cover of the current page.
    SetAlbumCover(AlbumCoverKind),
    /// Open the person edit dialog for one face.
    EditPerson {
        face_id: u64,
        face_url: String,
    },
    /// Close the lightbox sidebar.
    CloseSidepanel,
}

/// Messages for the host's notification area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    FacesDeleted(usize),
    FacesRemovedFromPerson(usize),
}

impl Notification {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::FacesDeleted(1) => "1 face deleted".to_string(),
            Self::FacesDeleted(n) => format!("{n} faces deleted"),
            Self::FacesRemovedFromPerson(1) => "1 face removed from person".to_string(),
            Self::FacesRemovedFromPerson(n) => format!("{n} faces removed from person"),
        }
    }
}

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Posts a request to the mutation worker without waiting for it.
    Submit(MutationRequest),

    /// Copies text to the clipboard.
    CopyToClipboard(String),

    /// Invokes a parent callback.
    Callback(ParentCallback),

    /// Asks the host router to navigate.
    Navigate(String),

    /// Shows a notification.
    Notify(Notification),

    /// Highlights a face on the photo, or clears the highlight.
    FaceHover(Option<FaceLocation>),
}
