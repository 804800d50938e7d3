//! Photo detail model shown in the lightbox sidebar.
//!
//! These types mirror the photo detail payload returned by the photo server.
//! Fields the sidebar does not use are ignored during deserialization.

use chrono::{DateTime, Utc};
use super::selection::ItemKind;
use serde::{Deserialize, Serialize};

/// Format used for the "time taken" line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Label assigned by "not this person".
pub const UNKNOWN_PERSON_LABEL: &str = "Unknown - Other";

/// Full details of a single photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoDetail {
    pub image_hash: String,
    #[serde(default)]
    pub exif_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub search_location: Option<String>,
    #[serde(default)]
    pub exif_gps_lat: Option<f64>,
    #[serde(default)]
    pub exif_gps_lon: Option<f64>,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub similar_photos: Vec<SimilarPhoto>,
}

impl PhotoDetail {
    /// Creates a detail with only the image hash set.
    #[must_use]
    pub fn new(image_hash: impl Into<String>) -> Self {
        Self {
            image_hash: image_hash.into(),
            exif_timestamp: None,
            search_location: None,
            exif_gps_lat: None,
            exif_gps_lon: None,
            people: Vec::new(),
            similar_photos: Vec::new(),
        }
    }

    /// Returns the capture time formatted for display, if known.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use photodeck::PhotoDetail;
    ///
    /// let mut detail = PhotoDetail::new("abc");
    /// assert_eq!(detail.formatted_timestamp(), None);
    ///
    /// detail.exif_timestamp = Utc.with_ymd_and_hms(2021, 7, 4, 18, 30, 0).single();
    /// assert_eq!(detail.formatted_timestamp().as_deref(), Some("2021-07-04 18:30"));
    /// ```
    #[must_use]
    pub fn formatted_timestamp(&self) -> Option<String> {
        self.exif_timestamp
            .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
    }
}

/// Who assigned a face label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonKind {
    /// Label confirmed or typed by the user.
    User,
    /// Label suggested by face recognition.
    #[serde(rename = "nonuser")]
    #[serde(other)]
    Inferred,
}

/// Bounding box of a face within the photo, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FaceLocation {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// A person detected in a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub face_id: u64,
    pub face_url: String,
    #[serde(default)]
    pub location: FaceLocation,
    #[serde(default)]
    pub probability: f64,
    #[serde(rename = "type")]
    pub kind: PersonKind,
}

/// A visually similar photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarPhoto {
    pub image_hash: String,
    #[serde(rename = "type", default)]
    pub media_type: String,
}

impl SimilarPhoto {
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind() == ItemKind::Video
    }

    /// Media tag derived from the server's `type` field.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        ItemKind::from_media_type(&self.media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_person_type_is_inferred() {
        let json = r#"{"name":"Ada","face_id":7,"face_url":"/media/faces/7.jpg","type":"suggested"}"#;
        let person: Person = serde_json::from_str(json).unwrap();
        assert_eq!(person.kind, PersonKind::Inferred);
        assert_eq!(person.location, FaceLocation::default());
    }

    #[test]
    fn detail_tolerates_missing_sections() {
        let detail: PhotoDetail =
            serde_json::from_str(r#"{"image_hash":"abc","extra_field":1}"#).unwrap();
        assert!(detail.people.is_empty());
        assert!(detail.similar_photos.is_empty());
        assert!(detail.exif_gps_lat.is_none());
    }

    #[test]
    fn similar_photo_video_detection() {
        let clip = SimilarPhoto { image_hash: "a".into(), media_type: "video".into() };
        let still = SimilarPhoto { image_hash: "b".into(), media_type: "image".into() };
        assert!(clip.is_video());
        assert!(!still.is_video());
        assert_eq!(clip.kind(), ItemKind::Video);
        let mp4 = SimilarPhoto { image_hash: "c".into(), media_type: "video/mp4".into() };
        assert_eq!(mp4.kind(), ItemKind::Video);
    }
}
