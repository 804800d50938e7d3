//! Application layer coordinating state, events and effects.
//!
//! The application layer follows a unidirectional data flow:
//!
//! ```text
//! Host input → Event → handle_event → State mutations → Effects → Runtime
//!                           ↑                                        ↓
//!                           └──────────── ServiceResponse ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`bulk`]: Bulk actions and the availability table
//! - [`person`]: Person row actions
//! - [`effects`]: Side effect commands emitted by the handler
//! - [`handler`]: Event processing and the pure dispatcher
//! - [`state`]: Selection and application state, view model computation

pub mod bulk;
pub mod effects;
pub mod handler;
pub mod person;
pub mod state;

pub use bulk::{available_actions, is_available, public_links, public_photo_url, BulkAction, MenuGroup};
pub use effects::{AlbumCoverKind, Effect, Notification, ParentCallback};
pub use handler::{handle_event, invoke, Dispatch, DispatchContext, Event};
pub use person::{available_person_actions, invoke_person, is_person_action_available, PersonAction};
pub use state::{AppState, SelectionState};
