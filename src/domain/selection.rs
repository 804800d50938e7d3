//! Selected item value type.
//!
//! A selection is an ordered list of [`SelectedItem`]s picked by the user in a
//! gridded photo list. Items carry the image hash used by the photo server and a
//! media tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Media tag of a selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Image,
    Video,
}

impl ItemKind {
    /// Classifies a server media type string such as `"video/mp4"` or `"image"`.
    #[must_use]
    pub fn from_media_type(media_type: &str) -> Self {
        if media_type.contains("video") {
            Self::Video
        } else {
            Self::Image
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => f.write_str("image"),
            Self::Video => f.write_str("video"),
        }
    }
}

/// One user-picked row of a photo list.
///
/// # Examples
///
/// ```
/// use photodeck::{ItemKind, SelectedItem};
///
/// let item = SelectedItem::image("3f2a9c");
/// assert_eq!(item.id, "3f2a9c");
/// assert_eq!(item.kind, ItemKind::Image);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedItem {
    /// Image hash identifying the item on the photo server.
    pub id: String,
    /// Media tag.
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
}

impl SelectedItem {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: ItemKind) -> Self {
        Self { id: id.into(), kind }
    }

    #[must_use]
    pub fn image(id: impl Into<String>) -> Self {
        Self::new(id, ItemKind::Image)
    }

    #[must_use]
    pub fn video(id: impl Into<String>) -> Self {
        Self::new(id, ItemKind::Video)
    }
}

/// Collects the identifiers of a selection, preserving order.
#[must_use]
pub fn item_ids(items: &[SelectedItem]) -> Vec<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_with_video_is_video() {
        assert_eq!(ItemKind::from_media_type("video/mp4"), ItemKind::Video);
        assert_eq!(ItemKind::from_media_type("image"), ItemKind::Image);
    }

    #[test]
    fn item_deserializes_from_tagged_json() {
        let item: SelectedItem = serde_json::from_str(r#"{"id":"abc","type":"video"}"#).unwrap();
        assert_eq!(item, SelectedItem::video("abc"));

        let untyped: SelectedItem = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        assert_eq!(untyped.kind, ItemKind::Image);
    }

    #[test]
    fn ids_keep_selection_order() {
        let items = vec![SelectedItem::image("b"), SelectedItem::image("a")];
        assert_eq!(item_ids(&items), vec!["b", "a"]);
    }
}
