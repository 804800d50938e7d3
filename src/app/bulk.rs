//! Bulk selection actions and their availability table.
//!
//! Availability is a pure function of the selection size and the route. The
//! menu renders unavailable actions as disabled, and the handler refuses to
//! invoke them, so the table below is the single source of truth for both.
//!
//! | Action            | Available when                                         |
//! |-------------------|--------------------------------------------------------|
//! | `AddToAlbum`      | selection non-empty                                    |
//! | photo actions     | selection non-empty                                    |
//! | `SetAlbumCover`   | `/person/` or `/useralbum/` route and exactly one item |
//! | `ShareAlbum`      | `/useralbum/` route                                    |
//! | `RemoveFromAlbum` | `/useralbum/` route and selection non-empty            |

use crate::domain::{RouteContext, RouteKind, SelectedItem};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// An action applicable to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BulkAction {
    AddToAlbum,
    Favorite,
    Unfavorite,
    Hide,
    Unhide,
    MakePublic,
    MakePrivate,
    Download,
    SoftDelete,
    Share,
    SetAlbumCover,
    ShareAlbum,
    RemoveFromAlbum,
}

/// Menu group an action is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuGroup {
    /// The "add to" menu.
    Album,
    /// Actions applied to each selected photo.
    Photo,
    /// Actions scoped to the album or person page being viewed.
    AlbumScoped,
}

impl BulkAction {
    /// Every action, in menu order.
    pub const ALL: [Self; 13] = [
        Self::AddToAlbum,
        Self::Favorite,
        Self::Unfavorite,
        Self::Hide,
        Self::Unhide,
        Self::MakePublic,
        Self::MakePrivate,
        Self::Download,
        Self::SoftDelete,
        Self::Share,
        Self::SetAlbumCover,
        Self::ShareAlbum,
        Self::RemoveFromAlbum,
    ];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddToAlbum => "Album",
            Self::Favorite => "Favorite",
            Self::Unfavorite => "Unfavorite",
            Self::Hide => "Hide",
            Self::Unhide => "Unhide",
            Self::MakePublic => "Make public",
            Self::MakePrivate => "Make private",
            Self::Download => "Download",
            Self::SoftDelete => "Move to trash",
            Self::Share => "Sharing",
            Self::SetAlbumCover => "Set as album cover",
            Self::ShareAlbum => "Share album",
            Self::RemoveFromAlbum => "Remove from album",
        }
    }

    /// Kebab-case name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddToAlbum => "add-to-album",
            Self::Favorite => "favorite",
            Self::Unfavorite => "unfavorite",
            Self::Hide => "hide",
            Self::Unhide => "unhide",
            Self::MakePublic => "make-public",
            Self::MakePrivate => "make-private",
            Self::Download => "download",
            Self::SoftDelete => "soft-delete",
            Self::Share => "share",
            Self::SetAlbumCover => "set-album-cover",
            Self::ShareAlbum => "share-album",
            Self::RemoveFromAlbum => "remove-from-album",
        }
    }

    #[must_use]
    pub const fn group(self) -> MenuGroup {
        match self {
            Self::AddToAlbum => MenuGroup::Album,
            Self::SetAlbumCover | Self::ShareAlbum | Self::RemoveFromAlbum => MenuGroup::AlbumScoped,
            _ => MenuGroup::Photo,
        }
    }

    /// Whether invoking the action clears the selection afterwards.
    ///
    /// Pure delegations to the parent (add to album, share, share album) leave
    /// the selection untouched.
    #[must_use]
    pub const fn resets_selection(self) -> bool {
        !matches!(self, Self::AddToAlbum | Self::Share | Self::ShareAlbum)
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BulkAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| format!("unknown action '{s}'"))
    }
}

/// Evaluates the availability predicate of one action.
///
/// # Examples
///
/// ```
/// use photodeck::{is_available, BulkAction, RouteContext};
///
/// let album = RouteContext::new("/useralbum/3");
/// assert!(is_available(BulkAction::SetAlbumCover, 1, &album));
/// assert!(!is_available(BulkAction::SetAlbumCover, 2, &album));
/// assert!(is_available(BulkAction::ShareAlbum, 0, &album));
/// ```
#[must_use]
pub fn is_available(action: BulkAction, selection_len: usize, route: &RouteContext) -> bool {
    let has_selection = selection_len > 0;

    match action {
        BulkAction::SetAlbumCover => {
            matches!(route.kind(), RouteKind::Person | RouteKind::UserAlbum) && selection_len == 1
        }
        BulkAction::ShareAlbum => route.is_user_album(),
        BulkAction::RemoveFromAlbum => route.is_user_album() && has_selection,
        _ => has_selection,
    }
}

/// Returns every action currently available for `selection` on `route`.
#[must_use]
pub fn available_actions(selection: &[SelectedItem], route: &RouteContext) -> BTreeSet<BulkAction> {
    BulkAction::ALL
        .into_iter()
        .filter(|action| is_available(*action, selection.len(), route))
        .collect()
}

/// Public URL of a photo once it has been made public.
#[must_use]
pub fn public_photo_url(server_address: &str, id: &str) -> String {
    format!("{server_address}/media/photos/{id}.jpg")
}

/// Newline-joined public URLs for every selected item, in selection order.
///
/// # Examples
///
/// ```
/// use photodeck::{public_links, SelectedItem};
///
/// let items = [SelectedItem::image("1"), SelectedItem::image("2")];
/// assert_eq!(
///     public_links("https://x", &items),
///     "https://x/media/photos/1.jpg\nhttps://x/media/photos/2.jpg"
/// );
/// ```
#[must_use]
pub fn public_links(server_address: &str, items: &[SelectedItem]) -> String {
    items
        .iter()
        .map(|item| public_photo_url(server_address, &item.id))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<SelectedItem> {
        (0..n).map(|i| SelectedItem::image(i.to_string())).collect()
    }

    const OTHER_ROUTES: [&str; 5] = ["/", "/favorites", "/albums/user", "/search/person/x", "/people"];

    #[test]
    fn album_cover_disabled_outside_person_and_user_album_routes() {
        for path in OTHER_ROUTES {
            let route = RouteContext::new(path);
            for n in 0..4 {
                assert!(!is_available(BulkAction::SetAlbumCover, n, &route), "{path} with {n}");
            }
        }
    }

    #[test]
    fn album_cover_requires_exactly_one_item() {
        for path in ["/person/12", "/useralbum/5"] {
            let route = RouteContext::new(path);
            assert!(!is_available(BulkAction::SetAlbumCover, 0, &route));
            assert!(is_available(BulkAction::SetAlbumCover, 1, &route));
            assert!(!is_available(BulkAction::SetAlbumCover, 2, &route));
            assert!(!is_available(BulkAction::SetAlbumCover, 7, &route));
        }
    }

    #[test]
    fn album_scoped_actions_need_user_album_route() {
        let person = RouteContext::new("/person/12");
        assert!(!is_available(BulkAction::ShareAlbum, 3, &person));
        assert!(!is_available(BulkAction::RemoveFromAlbum, 3, &person));

        let album = RouteContext::new("/useralbum/5");
        assert!(is_available(BulkAction::ShareAlbum, 0, &album));
        assert!(!is_available(BulkAction::RemoveFromAlbum, 0, &album));
        assert!(is_available(BulkAction::RemoveFromAlbum, 1, &album));
    }

    #[test]
    fn empty_selection_leaves_only_share_album() {
        let album = RouteContext::new("/useralbum/5");
        let available = available_actions(&[], &album);
        assert_eq!(available.into_iter().collect::<Vec<_>>(), vec![BulkAction::ShareAlbum]);

        assert!(available_actions(&[], &RouteContext::new("/")).is_empty());
    }

    #[test]
    fn photo_actions_follow_selection_only() {
        let route = RouteContext::new("/");
        let available = available_actions(&items(3), &route);
        for action in BulkAction::ALL {
            let expected = action.group() != MenuGroup::AlbumScoped;
            assert_eq!(available.contains(&action), expected, "{action}");
        }
    }

    #[test]
    fn parses_cli_names() {
        assert_eq!("make-public".parse::<BulkAction>(), Ok(BulkAction::MakePublic));
        assert_eq!("set-album-cover".parse::<BulkAction>(), Ok(BulkAction::SetAlbumCover));
        assert!("MakePublic".parse::<BulkAction>().is_err());
    }

    #[test]
    fn only_delegations_keep_the_selection() {
        let kept: Vec<_> = BulkAction::ALL.into_iter().filter(|a| !a.resets_selection()).collect();
        assert_eq!(kept, vec![BulkAction::AddToAlbum, BulkAction::Share, BulkAction::ShareAlbum]);
    }
}
