//! Effect execution.
//!
//! [`Runtime`] owns everything with side effects: the mutation worker, the
//! clipboard and the parent's callbacks. It feeds events through
//! [`handle_event`] and runs the returned effects in order. Nothing here waits
//! for a mutation to finish.

use crate::app::{handle_event, AlbumCoverKind, AppState, Effect, Event, Notification, ParentCallback};
use crate::domain::error::Result;
use crate::domain::FaceLocation;
use crate::infrastructure::Clipboard;
use crate::service::MutationWorker;

/// Flows owned by the component that embeds the selection menu.
///
/// Only the four bulk-action callbacks are required. The rest default to
/// logging and doing nothing.
pub trait ParentCallbacks {
    /// Opens the share dialog for the selected photos.
    fn share_photos(&mut self);

    /// Opens the share dialog for the current album.
    fn share_album(&mut self);

    /// Opens the add-to-album dialog.
    fn add_to_album(&mut self);

    /// Sets the single selected item as cover of the current person or album.
    fn set_album_cover(&mut self, kind: AlbumCoverKind);

    fn edit_person(&mut self, face_id: u64, face_url: &str) {
        tracing::debug!(face_id, face_url, "edit person requested, no handler");
    }

    fn close_sidepanel(&mut self) {
        tracing::debug!("close sidepanel requested, no handler");
    }

    fn navigate(&mut self, path: &str) {
        tracing::debug!(path, "navigation requested, no handler");
    }

    fn notify(&mut self, notification: Notification) {
        tracing::info!(message = %notification.message(), "notification");
    }

    fn face_hover(&mut self, location: Option<FaceLocation>) {
        tracing::trace!(?location, "face hover");
    }
}

/// Event loop glue between the handler and the outside world.
pub struct Runtime<C: Clipboard, P: ParentCallbacks> {
    worker: MutationWorker,
    clipboard: C,
    callbacks: P,
}

impl<C: Clipboard, P: ParentCallbacks> Runtime<C, P> {
    pub const fn new(worker: MutationWorker, clipboard: C, callbacks: P) -> Self {
        Self {
            worker,
            clipboard,
            callbacks,
        }
    }

    /// Handles one event and executes its effects.
    ///
    /// Returns whether the host should re-render.
    ///
    /// # Errors
    ///
    /// Propagates handler errors. Effects are not executed in that case.
    pub fn dispatch(&mut self, state: &mut AppState, event: &Event) -> Result<bool> {
        let (should_render, effects) = handle_event(state, event)?;

        tracing::debug!(
            effect_count = effects.len(),
            should_render,
            "event handled"
        );

        for effect in &effects {
            self.execute(effect);
        }

        Ok(should_render)
    }

    /// Executes a single effect.
    ///
    /// Clipboard failures are logged. They never undo the mutation that was
    /// already posted.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, effect: &Effect) {
        match effect {
            Effect::Submit(request) => self.worker.post(request.clone()),
            Effect::CopyToClipboard(text) => {
                if let Err(e) = self.clipboard.copy(text) {
                    tracing::error!(error = %e, "failed to copy to clipboard");
                }
            }
            Effect::Callback(callback) => match callback {
                ParentCallback::AddToAlbum => self.callbacks.add_to_album(),
                ParentCallback::SharePhotos => self.callbacks.share_photos(),
                ParentCallback::ShareAlbum => self.callbacks.share_album(),
                ParentCallback::SetAlbumCover(kind) => self.callbacks.set_album_cover(*kind),
                ParentCallback::EditPerson { face_id, face_url } => {
                    self.callbacks.edit_person(*face_id, face_url);
                }
                ParentCallback::CloseSidepanel => self.callbacks.close_sidepanel(),
            },
            Effect::Navigate(path) => self.callbacks.navigate(path),
            Effect::Notify(notification) => self.callbacks.notify(*notification),
            Effect::FaceHover(location) => self.callbacks.face_hover(*location),
        }
    }

    pub const fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub const fn callbacks(&self) -> &P {
        &self.callbacks
    }

    /// Stops the worker after the queued requests have run.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread panicked.
    pub fn shutdown(self) -> Result<(C, P)> {
        self.worker.shutdown()?;
        Ok((self.clipboard, self.callbacks))
    }
}
