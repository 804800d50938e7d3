//! Event handling and bulk action dispatch.
//!
//! [`invoke`] is the pure dispatcher: given an action and the context it is
//! invoked in, it returns the effects to run and whether the selection must be
//! cleared. [`handle_event`] applies events to [`AppState`], calling `invoke`
//! for bulk actions and clearing the selection right away. It never waits for
//! a request: the clear happens whether the request later succeeds, fails or
//! never resolves.
//!
//! # Example
//!
//! ```rust
//! use photodeck::{handle_event, AppState, BulkAction, Event, SelectedItem};
//!
//! let mut state = AppState::new("https://photos.example");
//! handle_event(&mut state, &Event::ToggleItem(SelectedItem::image("a1")))?;
//! let (_, effects) = handle_event(&mut state, &Event::InvokeBulk(BulkAction::Hide))?;
//!
//! assert_eq!(effects.len(), 1);
//! assert!(state.selection.is_empty());
//! assert!(!state.selection.select_mode);
//! # Ok::<(), photodeck::PhotodeckError>(())
//! ```

use super::bulk::{is_available, public_links, BulkAction};
use super::effects::{AlbumCoverKind, Effect, ParentCallback};
use super::person::{invoke_person, PersonAction};
use super::state::AppState;
use crate::domain::error::{PhotodeckError, Result};
use crate::domain::{item_ids, AlbumRef, PhotoDetail, RouteContext, RouteKind, SelectedItem};
use crate::service::{MutationRequest, ServiceResponse};

/// Everything a bulk action reads. Borrowed from the caller; never stored.
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    pub selection: &'a [SelectedItem],
    pub route: &'a RouteContext,
    pub album: Option<&'a AlbumRef>,
    /// Server origin used to build public links.
    pub server_address: &'a str,
}

/// Outcome of invoking a bulk action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dispatch {
    pub effects: Vec<Effect>,
    /// Whether the selection must be reset to `{select_mode: false, selected_items: []}`.
    pub reset_selection: bool,
}

impl Dispatch {
    fn rejected() -> Self {
        Self::default()
    }
}

/// Computes the effects of a bulk action.
///
/// The availability predicate is re-checked here, so an action that the menu
/// shows as disabled produces nothing even when called directly.
///
/// # Errors
///
/// Returns [`PhotodeckError::MissingAlbumContext`] when remove-from-album is
/// available but no album was supplied.
pub fn invoke(action: BulkAction, ctx: &DispatchContext<'_>) -> Result<Dispatch> {
    if !is_available(action, ctx.selection.len(), ctx.route) {
        tracing::debug!(
            %action,
            selection_len = ctx.selection.len(),
            route = %ctx.route,
            "action not available, ignoring"
        );
        return Ok(Dispatch::rejected());
    }

    let ids = || item_ids(ctx.selection);

    let effects = match action {
        BulkAction::AddToAlbum => vec![Effect::Callback(ParentCallback::AddToAlbum)],
        BulkAction::Favorite => vec![Effect::Submit(MutationRequest::set_favorite(ids(), true))],
        BulkAction::Unfavorite => vec![Effect::Submit(MutationRequest::set_favorite(ids(), false))],
        BulkAction::Hide => vec![Effect::Submit(MutationRequest::set_hidden(ids(), true))],
        BulkAction::Unhide => vec![Effect::Submit(MutationRequest::set_hidden(ids(), false))],
        BulkAction::MakePublic => vec![
            Effect::Submit(MutationRequest::set_public(ids(), true)),
            Effect::CopyToClipboard(public_links(ctx.server_address, ctx.selection)),
        ],
        BulkAction::MakePrivate => vec![Effect::Submit(MutationRequest::set_public(ids(), false))],
        BulkAction::Download => vec![Effect::Submit(MutationRequest::download_archive(ids()))],
        BulkAction::SoftDelete => vec![Effect::Submit(MutationRequest::mark_deleted(ids(), true))],
        BulkAction::Share => vec![Effect::Callback(ParentCallback::SharePhotos)],
        BulkAction::SetAlbumCover => {
            let kind = match ctx.route.kind() {
                RouteKind::Person => AlbumCoverKind::Person,
                _ => AlbumCoverKind::UserAlbum,
            };
            vec![Effect::Callback(ParentCallback::SetAlbumCover(kind))]
        }
        BulkAction::ShareAlbum => vec![Effect::Callback(ParentCallback::ShareAlbum)],
        BulkAction::RemoveFromAlbum => {
            let album = ctx.album.ok_or_else(|| PhotodeckError::MissingAlbumContext {
                route: ctx.route.to_string(),
            })?;
            vec![Effect::Submit(MutationRequest::remove_from_album(
                album.id,
                album.title.clone(),
                ids(),
            ))]
        }
    };

    tracing::debug!(
        %action,
        selection_len = ctx.selection.len(),
        effect_count = effects.len(),
        "action dispatched"
    );

    Ok(Dispatch {
        effects,
        reset_selection: action.resets_selection(),
    })
}

/// Events from the host UI, the list view and the mutation worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Adds an item to the selection, or removes it if already selected.
    ToggleItem(SelectedItem),
    /// Replaces the whole selection.
    SelectItems(Vec<SelectedItem>),
    /// Switches multi-select mode on or off without touching the items.
    SetSelectMode(bool),
    /// Clears the selection.
    ClearSelection,

    /// The router moved to a new path.
    RouteChanged(RouteContext),
    /// The user album being viewed changed.
    AlbumChanged(Option<AlbumRef>),
    /// Switches between the owner view and a public shared view.
    SetPublicView(bool),

    /// A bulk action menu item was clicked.
    InvokeBulk(BulkAction),

    /// A photo was opened in the lightbox.
    OpenPhoto(PhotoDetail),
    /// The sidebar close button was clicked.
    CloseSidepanel,
    /// An action was clicked on the person row of `face_id`.
    InvokePerson {
        action: PersonAction,
        face_id: u64,
    },
    /// The pointer entered (`Some`) or left (`None`) a person row.
    HoverPerson(Option<u64>),
    /// The person edit dialog was closed.
    PersonEditClosed,

    /// The mutation worker reported an outcome.
    ServiceResponse(ServiceResponse),
}

/// Processes an event, mutates state and returns the effects to execute.
///
/// # Returns
///
/// `(should_render, effects)`. `should_render` is `true` when state visible in
/// a view model changed.
///
/// # Errors
///
/// Propagates errors from [`invoke`].
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Effect>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::ToggleItem(item) => {
            state.selection.toggle(item.clone());
            tracing::trace!(item_id = %item.id, selection_len = state.selection.len(), "selection toggled");
            Ok((true, vec![]))
        }
        Event::SelectItems(items) => {
            state.selection.replace(items.clone());
            Ok((true, vec![]))
        }
        Event::SetSelectMode(enabled) => {
            if state.selection.select_mode == *enabled {
                return Ok((false, vec![]));
            }
            state.selection.select_mode = *enabled;
            Ok((true, vec![]))
        }
        Event::ClearSelection => {
            state.selection.clear();
            Ok((true, vec![]))
        }
        Event::RouteChanged(route) => {
            if &state.route == route {
                return Ok((false, vec![]));
            }
            tracing::debug!(from = %state.route, to = %route, "route changed");
            state.route = route.clone();
            Ok((true, vec![]))
        }
        Event::AlbumChanged(album) => {
            state.album.clone_from(album);
            Ok((false, vec![]))
        }
        Event::SetPublicView(is_public) => {
            if state.is_public == *is_public {
                return Ok((false, vec![]));
            }
            state.is_public = *is_public;
            Ok((true, vec![]))
        }
        Event::InvokeBulk(action) => {
            let ctx = DispatchContext {
                selection: &state.selection.selected_items,
                route: &state.route,
                album: state.album.as_ref(),
                server_address: &state.server_address,
            };
            let dispatch = invoke(*action, &ctx)?;

            if dispatch.reset_selection {
                tracing::debug!(%action, "clearing selection after submit");
                state.selection.clear();
            }

            Ok((dispatch.reset_selection, dispatch.effects))
        }
        Event::OpenPhoto(detail) => {
            tracing::debug!(image_hash = %detail.image_hash, "photo opened");
            state.photo_detail = Some(detail.clone());
            Ok((true, vec![]))
        }
        Event::CloseSidepanel => Ok((false, vec![Effect::Callback(ParentCallback::CloseSidepanel)])),
        Event::InvokePerson { action, face_id } => {
            let Some(detail) = state.photo_detail.as_ref() else {
                tracing::debug!(?action, "no photo open");
                return Ok((false, vec![]));
            };
            let Some(person) = detail.people.iter().find(|p| p.face_id == *face_id) else {
                tracing::debug!(?action, face_id, "face not found on open photo");
                return Ok((false, vec![]));
            };

            Ok((false, invoke_person(*action, person, &detail.image_hash, state.is_public)))
        }
        Event::HoverPerson(face_id) => {
            let location = face_id.and_then(|id| {
                state
                    .photo_detail
                    .as_ref()?
                    .people
                    .iter()
                    .find(|p| p.face_id == id)
                    .map(|p| p.location)
            });
            Ok((false, vec![Effect::FaceHover(location)]))
        }
        Event::PersonEditClosed => Ok((
            false,
            state
                .photo_detail
                .as_ref()
                .map(|detail| {
                    Effect::Submit(MutationRequest::refresh_photo_details(detail.image_hash.clone()))
                })
                .into_iter()
                .collect(),
        )),
        Event::ServiceResponse(response) => match response {
            ServiceResponse::PhotoDetailsLoaded { detail } => {
                let is_open = state
                    .photo_detail
                    .as_ref()
                    .is_some_and(|open| open.image_hash == detail.image_hash);

                if !is_open {
                    tracing::debug!(image_hash = %detail.image_hash, "details for a closed photo, ignoring");
                    return Ok((false, vec![]));
                }
                if state.photo_detail.as_ref() == Some(detail) {
                    tracing::debug!("photo details unchanged, skipping render");
                    return Ok((false, vec![]));
                }

                state.photo_detail = Some(detail.clone());
                Ok((true, vec![]))
            }
            ServiceResponse::Completed { operation, item_count } => {
                tracing::debug!(operation = %operation, item_count, "request completed");
                Ok((false, vec![]))
            }
            ServiceResponse::Error { operation, message } => {
                tracing::debug!(operation = %operation, message = %message, "request failure reported");
                Ok((false, vec![]))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FaceLocation, Person, PersonKind};

    fn selection(ids: &[&str]) -> Vec<SelectedItem> {
        ids.iter().map(|id| SelectedItem::image(*id)).collect()
    }

    fn ctx<'a>(items: &'a [SelectedItem], route: &'a RouteContext) -> DispatchContext<'a> {
        DispatchContext {
            selection: items,
            route,
            album: None,
            server_address: "https://x",
        }
    }

    #[test]
    fn make_public_copies_newline_joined_links() {
        let items = selection(&["1", "2"]);
        let route = RouteContext::new("/");
        let dispatch = invoke(BulkAction::MakePublic, &ctx(&items, &route)).unwrap();

        assert!(dispatch.reset_selection);
        assert_eq!(
            dispatch.effects,
            vec![
                Effect::Submit(MutationRequest::set_public(vec!["1".into(), "2".into()], true)),
                Effect::CopyToClipboard(
                    "https://x/media/photos/1.jpg\nhttps://x/media/photos/2.jpg".to_string()
                ),
            ]
        );
    }

    #[test]
    fn download_with_empty_selection_issues_nothing() {
        let route = RouteContext::new("/");
        let dispatch = invoke(BulkAction::Download, &ctx(&[], &route)).unwrap();
        assert_eq!(dispatch, Dispatch::default());
    }

    #[test]
    fn album_cover_kind_follows_route() {
        let items = selection(&["1"]);
        for (path, kind) in [
            ("/person/3", AlbumCoverKind::Person),
            ("/useralbum/3", AlbumCoverKind::UserAlbum),
        ] {
            let route = RouteContext::new(path);
            let dispatch = invoke(BulkAction::SetAlbumCover, &ctx(&items, &route)).unwrap();
            assert_eq!(
                dispatch.effects,
                vec![Effect::Callback(ParentCallback::SetAlbumCover(kind))]
            );
            assert!(dispatch.reset_selection);
        }
    }

    #[test]
    fn remove_from_album_needs_album_context() {
        let items = selection(&["1"]);
        let route = RouteContext::new("/useralbum/9");
        let err = invoke(BulkAction::RemoveFromAlbum, &ctx(&items, &route)).unwrap_err();
        assert!(matches!(err, PhotodeckError::MissingAlbumContext { .. }));

        let album = AlbumRef::new(9, "Summer");
        let with_album = DispatchContext { album: Some(&album), ..ctx(&items, &route) };
        let dispatch = invoke(BulkAction::RemoveFromAlbum, &with_album).unwrap();
        assert_eq!(
            dispatch.effects,
            vec![Effect::Submit(MutationRequest::remove_from_album(9, "Summer".into(), vec!["1".into()]))]
        );
    }

    #[test]
    fn share_delegates_without_reset() {
        let mut state = AppState::new("https://x");
        state.selection.replace(selection(&["1", "2"]));

        let (render, effects) = handle_event(&mut state, &Event::InvokeBulk(BulkAction::Share)).unwrap();
        assert!(!render);
        assert_eq!(effects, vec![Effect::Callback(ParentCallback::SharePhotos)]);
        assert_eq!(state.selection.len(), 2);
    }

    #[test]
    fn every_request_action_resets_selection() {
        for action in BulkAction::ALL.into_iter().filter(|a| a.resets_selection()) {
            let mut state = AppState::new("https://x");
            state.route = RouteContext::new("/useralbum/4");
            state.album = Some(AlbumRef::new(4, "Trip"));
            state.selection.replace(selection(&["1"]));

            let (_, effects) = handle_event(&mut state, &Event::InvokeBulk(action)).unwrap();
            assert!(!effects.is_empty(), "{action}");
            assert!(state.selection.is_empty(), "{action}");
            assert!(!state.selection.select_mode, "{action}");
        }
    }

    #[test]
    fn rejected_action_keeps_selection() {
        let mut state = AppState::new("https://x");
        state.selection.replace(selection(&["1", "2"]));

        let (render, effects) =
            handle_event(&mut state, &Event::InvokeBulk(BulkAction::SetAlbumCover)).unwrap();
        assert!(!render);
        assert!(effects.is_empty());
        assert_eq!(state.selection.len(), 2);
    }

    fn state_with_photo() -> AppState {
        let mut detail = PhotoDetail::new("h1");
        detail.people.push(Person {
            name: "Ada".into(),
            face_id: 5,
            face_url: "/media/faces/5.jpg".into(),
            location: FaceLocation { top: 1, right: 2, bottom: 3, left: 4 },
            probability: 0.4,
            kind: PersonKind::Inferred,
        });
        let mut state = AppState::new("https://x");
        state.photo_detail = Some(detail);
        state
    }

    #[test]
    fn hover_reports_face_location() {
        let mut state = state_with_photo();
        let (_, effects) = handle_event(&mut state, &Event::HoverPerson(Some(5))).unwrap();
        assert_eq!(
            effects,
            vec![Effect::FaceHover(Some(FaceLocation { top: 1, right: 2, bottom: 3, left: 4 }))]
        );

        let (_, effects) = handle_event(&mut state, &Event::HoverPerson(None)).unwrap();
        assert_eq!(effects, vec![Effect::FaceHover(None)]);
    }

    #[test]
    fn person_action_on_unknown_face_does_nothing() {
        let mut state = state_with_photo();
        let event = Event::InvokePerson { action: PersonAction::DeleteFace, face_id: 99 };
        let (_, effects) = handle_event(&mut state, &event).unwrap();
        assert!(effects.is_empty());
    }

    #[test]
    fn refreshed_details_replace_open_photo_only() {
        let mut state = state_with_photo();

        let other = PhotoDetail::new("other");
        let event = Event::ServiceResponse(ServiceResponse::PhotoDetailsLoaded { detail: other });
        assert!(!handle_event(&mut state, &event).unwrap().0);

        let refreshed = PhotoDetail::new("h1");
        let event = Event::ServiceResponse(ServiceResponse::PhotoDetailsLoaded { detail: refreshed });
        assert!(handle_event(&mut state, &event).unwrap().0);
        assert!(state.photo_detail.as_ref().unwrap().people.is_empty());
    }

    #[test]
    fn closing_person_editor_refreshes_details() {
        let mut state = state_with_photo();
        let (_, effects) = handle_event(&mut state, &Event::PersonEditClosed).unwrap();
        assert_eq!(
            effects,
            vec![Effect::Submit(MutationRequest::refresh_photo_details("h1".into()))]
        );

        let (render, effects) = handle_event(&mut state, &Event::CloseSidepanel).unwrap();
        assert!(!render);
        assert_eq!(effects, vec![Effect::Callback(ParentCallback::CloseSidepanel)]);
    }

    #[test]
    fn public_view_renders_only_on_change() {
        let mut state = AppState::new("https://x");
        assert!(!handle_event(&mut state, &Event::SetPublicView(false)).unwrap().0);
        assert!(handle_event(&mut state, &Event::SetPublicView(true)).unwrap().0);
        assert!(!handle_event(&mut state, &Event::SetPublicView(true)).unwrap().0);
        assert!(state.is_public);
    }

    #[test]
    fn failed_request_outcome_changes_nothing() {
        let mut state = state_with_photo();
        state.selection.replace(selection(&["1"]));
        let before = state.clone();

        let event = Event::ServiceResponse(ServiceResponse::Error {
            operation: "set hidden".into(),
            message: "Service error: photosedit/hide/ returned 500".into(),
        });
        let (render, effects) = handle_event(&mut state, &event).unwrap();

        assert!(!render);
        assert!(effects.is_empty());
        assert_eq!(state.selection, before.selection);
        assert_eq!(state.photo_detail, before.photo_detail);
    }
}
