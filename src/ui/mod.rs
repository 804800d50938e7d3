//! User interface layer: view models and a text renderer.
//!
//! ```text
//! AppState → compute_*_viewmodel → view model → host UI or render_* → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types
//! - [`renderer`]: Plain-text rendering used by the command-line shim

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_menu, render_sidebar};
pub use viewmodel::{
    MenuItem, MenuSection, MenuViewModel, PersonRowViewModel, SidebarViewModel, SimilarTile,
};
