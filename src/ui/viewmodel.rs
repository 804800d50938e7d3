//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) and contain
//! no business logic, only display-ready data. Host UIs (web, terminal) render
//! them however they like; [`renderer`](super::renderer) renders them as text.

use crate::app::{BulkAction, PersonAction};

/// Selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuViewModel {
    /// Number of selected items, shown in section titles.
    pub selected_count: usize,

    /// Whether the "add to" menu button can be opened.
    pub add_menu_enabled: bool,

    /// Sections in display order: album, photo actions, album actions.
    pub sections: Vec<MenuSection>,
}

impl MenuViewModel {
    /// Looks up the item for `action`.
    #[must_use]
    pub fn item(&self, action: BulkAction) -> Option<&MenuItem> {
        self.sections
            .iter()
            .flat_map(|section| &section.items)
            .find(|item| item.action == action)
    }
}

/// A titled group of menu items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// One menu entry. Disabled entries stay visible to preserve layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub action: BulkAction,
    pub label: &'static str,
    pub enabled: bool,
}

/// Lightbox sidebar for one photo.
///
/// Optional sections are `None` or empty when they should not be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarViewModel {
    pub title: String,

    /// Formatted capture time.
    pub timestamp: Option<String>,

    /// Reverse-geocoded location text.
    pub location: Option<String>,

    /// GPS coordinates `(lat, lon)` for the map marker.
    pub map_marker: Option<(f64, f64)>,

    pub people: Vec<PersonRowViewModel>,

    /// Similar photos, capped at [`MAX_SIMILAR_PHOTOS`](crate::app::state::MAX_SIMILAR_PHOTOS).
    pub similar_photos: Vec<SimilarTile>,
}

/// One person row in the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRowViewModel {
    pub name: String,
    pub face_id: u64,

    /// Absolute URL of the face crop.
    pub avatar_url: String,

    /// Recognition confidence in `0.0..=1.0`.
    pub probability: f64,

    /// Whether the confidence indicator is shown (suggested labels only).
    pub show_probability: bool,

    /// Actions offered on this row. Unavailable actions are omitted.
    pub actions: Vec<PersonAction>,
}

/// A similar-photo tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarTile {
    pub image_hash: String,
    pub is_video: bool,
}
