//! Plain-text rendering of view models.
//!
//! Used by the command-line shim. Disabled menu entries are rendered with a
//! `-` marker instead of being hidden.

use crate::ui::viewmodel::{MenuViewModel, SidebarViewModel};
use std::fmt::Write as _;

/// Renders the selection menu.
///
/// # Example
///
/// ```rust
/// use photodeck::{AppState, RouteContext};
/// use photodeck::ui::render_menu;
///
/// let mut state = AppState::new("https://x");
/// state.route = RouteContext::new("/useralbum/3");
/// let text = render_menu(&state.compute_menu_viewmodel());
/// assert!(text.contains("+ Share album"));
/// assert!(text.contains("- Favorite"));
/// ```
#[must_use]
pub fn render_menu(vm: &MenuViewModel) -> String {
    let mut out = String::new();

    for section in &vm.sections {
        let _ = writeln!(out, "{}", section.title);
        for item in &section.items {
            let marker = if item.enabled { '+' } else { '-' };
            let _ = writeln!(out, "  {marker} {}", item.label);
        }
    }

    out
}

/// Renders the lightbox sidebar.
#[must_use]
pub fn render_sidebar(vm: &SidebarViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", vm.title);

    if let Some(timestamp) = &vm.timestamp {
        let _ = writeln!(out, "Taken: {timestamp}");
    }
    if let Some(location) = &vm.location {
        let _ = writeln!(out, "Location: {location}");
    }
    if let Some((lat, lon)) = vm.map_marker {
        let _ = writeln!(out, "Map: {lat:.5}, {lon:.5}");
    }

    if !vm.people.is_empty() {
        let _ = writeln!(out, "People");
        for row in &vm.people {
            let actions: Vec<&str> = row.actions.iter().map(|a| a.label()).collect();
            if row.show_probability {
                let _ = write!(out, "  {} ({:.0}%)", row.name, row.probability * 100.0);
            } else {
                let _ = write!(out, "  {}", row.name);
            }
            if actions.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, " [{}]", actions.join(", "));
            }
        }
    }

    if !vm.similar_photos.is_empty() {
        let _ = writeln!(out, "Similar photos");
        for tile in &vm.similar_photos {
            let suffix = if tile.is_video { " (video)" } else { "" };
            let _ = writeln!(out, "  {}{suffix}", tile.image_hash);
        }
    }

    out
}
