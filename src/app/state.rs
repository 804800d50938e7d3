//! Application state and view model computation.
//!
//! [`SelectionState`] mirrors the selection owned by the photo list: the list
//! view mutates it, the dispatcher only ever clears it. [`AppState`] adds the
//! context the dispatcher reads (route, album, server address) and the photo
//! currently open in the lightbox.

use super::bulk::{is_available, BulkAction, MenuGroup};
use super::person::available_person_actions;
use crate::domain::{AlbumRef, PersonKind, PhotoDetail, RouteContext, SelectedItem};
use crate::ui::viewmodel::{
    MenuItem, MenuSection, MenuViewModel, PersonRowViewModel, SidebarViewModel, SimilarTile,
};

/// Maximum number of similar photos shown in the sidebar.
pub const MAX_SIMILAR_PHOTOS: usize = 30;

/// Selection of the photo list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Whether the list is in multi-select mode.
    pub select_mode: bool,
    /// Picked items, in the order they were picked.
    pub selected_items: Vec<SelectedItem>,
}

impl SelectionState {
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected_items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_items.is_empty()
    }

    /// Adds the item, or removes it if it is already selected.
    ///
    /// Selecting anything switches select mode on.
    pub fn toggle(&mut self, item: SelectedItem) {
        if let Some(pos) = self.selected_items.iter().position(|i| i.id == item.id) {
            self.selected_items.remove(pos);
        } else {
            self.selected_items.push(item);
            self.select_mode = true;
        }
    }

    /// Replaces the selection, dropping duplicate ids.
    pub fn replace(&mut self, items: Vec<SelectedItem>) {
        self.selected_items.clear();
        for item in items {
            if !self.selected_items.iter().any(|i| i.id == item.id) {
                self.selected_items.push(item);
            }
        }
        if !self.selected_items.is_empty() {
            self.select_mode = true;
        }
    }

    /// Resets to `{select_mode: false, selected_items: []}`.
    pub fn clear(&mut self) {
        self.select_mode = false;
        self.selected_items.clear();
    }
}

/// State read and updated by the event handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub selection: SelectionState,
    pub route: RouteContext,
    /// User album being viewed, required by remove-from-album.
    pub album: Option<AlbumRef>,
    /// Server origin used for public links and avatar URLs, without a trailing slash.
    pub server_address: String,
    /// Photo open in the lightbox, if any.
    pub photo_detail: Option<PhotoDetail>,
    /// Whether the viewer is looking at a public shared page.
    pub is_public: bool,
}

impl AppState {
    #[must_use]
    pub fn new(server_address: impl Into<String>) -> Self {
        Self {
            selection: SelectionState::default(),
            route: RouteContext::default(),
            album: None,
            server_address: server_address.into(),
            photo_detail: None,
            is_public: false,
        }
    }

    /// Computes the selection menu.
    ///
    /// Unavailable actions are kept in place and marked disabled.
    #[must_use]
    pub fn compute_menu_viewmodel(&self) -> MenuViewModel {
        let selected_count = self.selection.len();

        let section = |group: MenuGroup, title: String| MenuSection {
            title,
            items: BulkAction::ALL
                .into_iter()
                .filter(|action| action.group() == group)
                .map(|action| MenuItem {
                    action,
                    label: action.label(),
                    enabled: is_available(action, selected_count, &self.route),
                })
                .collect(),
        };

        MenuViewModel {
            selected_count,
            add_menu_enabled: selected_count > 0,
            sections: vec![
                section(MenuGroup::Album, format!("Album ({selected_count} selected)")),
                section(MenuGroup::Photo, format!("Photo actions ({selected_count} selected)")),
                section(MenuGroup::AlbumScoped, "Album actions".to_string()),
            ],
        }
    }

    /// Computes the lightbox sidebar for the open photo.
    ///
    /// Returns `None` when no photo is open.
    #[must_use]
    pub fn compute_sidebar_viewmodel(&self) -> Option<SidebarViewModel> {
        let detail = self.photo_detail.as_ref()?;

        let people = detail
            .people
            .iter()
            .map(|person| PersonRowViewModel {
                name: person.name.clone(),
                face_id: person.face_id,
                avatar_url: format!("{}{}", self.server_address, person.face_url),
                probability: person.probability,
                show_probability: person.kind != PersonKind::User,
                actions: available_person_actions(person, self.is_public).into_iter().collect(),
            })
            .collect();

        let similar_photos = detail
            .similar_photos
            .iter()
            .take(MAX_SIMILAR_PHOTOS)
            .map(|photo| SimilarTile {
                image_hash: photo.image_hash.clone(),
                is_video: photo.is_video(),
            })
            .collect();

        Some(SidebarViewModel {
            title: "Details".to_string(),
            timestamp: detail.formatted_timestamp(),
            location: detail.search_location.clone(),
            map_marker: detail.exif_gps_lat.zip(detail.exif_gps_lon),
            people,
            similar_photos,
        })
    }
}
