//! Per-person actions offered in the lightbox sidebar.
//!
//! A person row belongs to one detected face. In the public (shared link) view
//! no action is offered. Faces labelled by the user cannot be confirmed or
//! deleted from the row.

use super::effects::{Effect, Notification, ParentCallback};
use crate::domain::{Person, PersonKind, UNKNOWN_PERSON_LABEL};
use crate::service::MutationRequest;
use std::collections::BTreeSet;

/// An action on a single person row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PersonAction {
    /// Search for other photos of this person.
    OpenSearch,
    /// Accept the suggested label.
    ConfirmLabel,
    /// Open the edit dialog.
    Edit,
    /// Reassign the face to the unknown bucket.
    NotThisPerson,
    /// Delete the face detection.
    DeleteFace,
}

impl PersonAction {
    pub const ALL: [Self; 5] = [
        Self::OpenSearch,
        Self::ConfirmLabel,
        Self::Edit,
        Self::NotThisPerson,
        Self::DeleteFace,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenSearch => "Search",
            Self::ConfirmLabel => "Confirm",
            Self::Edit => "Edit",
            Self::NotThisPerson => "Not this person",
            Self::DeleteFace => "Delete face",
        }
    }
}

/// Whether `action` is offered for a person of `kind`.
#[must_use]
pub fn is_person_action_available(action: PersonAction, is_public: bool, kind: PersonKind) -> bool {
    if is_public {
        return false;
    }

    match action {
        PersonAction::ConfirmLabel | PersonAction::DeleteFace => kind != PersonKind::User,
        PersonAction::OpenSearch | PersonAction::Edit | PersonAction::NotThisPerson => true,
    }
}

#[must_use]
pub fn available_person_actions(person: &Person, is_public: bool) -> BTreeSet<PersonAction> {
    PersonAction::ALL
        .into_iter()
        .filter(|action| is_person_action_available(*action, is_public, person.kind))
        .collect()
}

/// Computes the effects of a person action.
///
/// Returns no effects when the action is not available.
///
/// # Parameters
///
/// * `image_hash` - Photo whose details are refreshed after relabelling
#[must_use]
pub fn invoke_person(
    action: PersonAction,
    person: &Person,
    image_hash: &str,
    is_public: bool,
) -> Vec<Effect> {
    if !is_person_action_available(action, is_public, person.kind) {
        tracing::debug!(?action, face_id = person.face_id, "person action not available");
        return vec![];
    }

    tracing::debug!(?action, face_id = person.face_id, person = %person.name, "person action invoked");

    match action {
        PersonAction::OpenSearch => vec![Effect::Navigate(format!("/search/{}", person.name))],
        PersonAction::ConfirmLabel => vec![Effect::Submit(MutationRequest::label_faces(
            vec![person.face_id],
            person.name.clone(),
        ))],
        PersonAction::Edit => vec![Effect::Callback(ParentCallback::EditPerson {
            face_id: person.face_id,
            face_url: person.face_url.clone(),
        })],
        PersonAction::NotThisPerson => vec![
            Effect::Submit(MutationRequest::label_faces(
                vec![person.face_id],
                UNKNOWN_PERSON_LABEL.to_string(),
            )),
            Effect::Notify(Notification::FacesRemovedFromPerson(1)),
            Effect::Submit(MutationRequest::refresh_photo_details(image_hash.to_string())),
        ],
        PersonAction::DeleteFace => vec![
            Effect::Submit(MutationRequest::delete_faces(vec![person.face_id])),
            Effect::Notify(Notification::FacesDeleted(1)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FaceLocation;

    fn person(kind: PersonKind) -> Person {
        Person {
            name: "Ada".to_string(),
            face_id: 42,
            face_url: "/media/faces/42.jpg".to_string(),
            location: FaceLocation::default(),
            probability: 0.8,
            kind,
        }
    }

    #[test]
    fn public_view_offers_nothing() {
        assert!(available_person_actions(&person(PersonKind::Inferred), true).is_empty());
        assert!(invoke_person(PersonAction::OpenSearch, &person(PersonKind::User), "h", true).is_empty());
    }

    #[test]
    fn user_labels_cannot_be_confirmed_or_deleted() {
        let actions = available_person_actions(&person(PersonKind::User), false);
        assert!(!actions.contains(&PersonAction::ConfirmLabel));
        assert!(!actions.contains(&PersonAction::DeleteFace));
        assert!(actions.contains(&PersonAction::Edit));
        assert!(actions.contains(&PersonAction::NotThisPerson));

        let effects = invoke_person(PersonAction::DeleteFace, &person(PersonKind::User), "h", false);
        assert!(effects.is_empty());
    }

    #[test]
    fn not_this_person_relabels_notifies_and_refreshes() {
        let effects = invoke_person(PersonAction::NotThisPerson, &person(PersonKind::Inferred), "h1", false);
        assert_eq!(
            effects,
            vec![
                Effect::Submit(MutationRequest::label_faces(vec![42], "Unknown - Other".to_string())),
                Effect::Notify(Notification::FacesRemovedFromPerson(1)),
                Effect::Submit(MutationRequest::refresh_photo_details("h1".to_string())),
            ]
        );
    }

    #[test]
    fn open_search_navigates_by_name() {
        let effects = invoke_person(PersonAction::OpenSearch, &person(PersonKind::User), "h", false);
        assert_eq!(effects, vec![Effect::Navigate("/search/Ada".to_string())]);
    }

    #[test]
    fn delete_face_submits_and_notifies() {
        let effects = invoke_person(PersonAction::DeleteFace, &person(PersonKind::Inferred), "h", false);
        assert_eq!(
            effects,
            vec![
                Effect::Submit(MutationRequest::delete_faces(vec![42])),
                Effect::Notify(Notification::FacesDeleted(1)),
            ]
        );
    }
}
