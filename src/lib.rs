//! Photodeck: bulk selection actions for a photo-management client.
//!
//! Photodeck provides:
//! - A bulk action menu whose entries are enabled from the selection and route
//! - Optimistic, fire-and-forget mutation requests on a background worker
//! - Person row actions and the lightbox sidebar view model
//! - Persistent traces exported as OTLP JSON files

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command-line Shim (main.rs)                        │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← Effect execution
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Availability table                               │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Service Layer │   │ Infrastructure│
//! │ (ui/)         │   │ (service/)    │   │ (infra../)    │
//! │ - View models │   │ - HTTP client │   │ - Clipboard   │
//! │ - Text render │   │ - Worker      │   │ - Paths       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/)                                   │
//! │  - Selection, route, photo detail, errors           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Event handling, bulk and person actions, state
//! - [`domain`]: Core domain types (selection, route, photo, errors)
//! - [`infrastructure`]: Clipboard and platform paths
//! - [`runtime`]: Executes effects against the worker, clipboard and callbacks
//! - [`service`]: Mutation requests, HTTP backend and background worker
//! - [`ui`]: View models and a plain-text renderer
//! - `observability`: OpenTelemetry tracing (internal)
//!
//! # Configuration
//!
//! Either `key=value` pairs or a TOML file:
//!
//! ```toml
//! server_address = "https://photos.example"
//! auth_token = "..."
//! request_timeout_secs = 30
//! trace_level = "debug"
//! ```
//!
//! # Optimistic Updates
//!
//! Selection-mutating actions post their request and clear the selection in
//! the same call. The outcome is never awaited by the dispatcher; failures are
//! logged on the worker thread and optionally forwarded to a listener.
//!
//! # Examples
//!
//! ```rust
//! use photodeck::{initialize, handle_event, BulkAction, Config, Event, RouteContext, SelectedItem};
//!
//! let mut state = initialize(&Config::default());
//!
//! let events = vec![
//!     Event::RouteChanged(RouteContext::new("/person/12")),
//!     Event::ToggleItem(SelectedItem::image("a1")),
//!     Event::InvokeBulk(BulkAction::SetAlbumCover),
//! ];
//! for event in &events {
//!     let (_render, effects) = handle_event(&mut state, event)?;
//!     // Execute effects...
//!     # let _ = effects;
//! }
//! assert!(state.selection.is_empty());
//! # Ok::<(), photodeck::PhotodeckError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod service;
pub mod ui;

pub mod observability;

pub use app::{
    available_actions, handle_event, invoke, is_available, public_links, AppState, BulkAction,
    Effect, Event, PersonAction,
};
pub use domain::{
    AlbumRef, ItemKind, PhotoDetail, PhotodeckError, Result, RouteContext, RouteKind, SelectedItem,
};
pub use runtime::{ParentCallbacks, Runtime};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Default photo server origin.
pub const DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8000";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Photo server origin, without a trailing slash.
    ///
    /// Used for the REST API (`{server_address}/api/...`) and public links
    /// (`{server_address}/media/photos/{id}.jpg`). Default: `http://localhost:8000`
    pub server_address: String,

    /// Bearer token sent with every request.
    pub auth_token: Option<String>,

    /// Per-request timeout. Default: 30
    pub request_timeout_secs: u64,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            auth_token: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from string pairs.
    ///
    /// Unknown keys are ignored and unparsable values fall back to defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use photodeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("server_address".to_string(), "https://photos.example/".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.server_address, "https://photos.example");
    /// assert_eq!(config.request_timeout_secs, 30);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let server_address = config
            .get("server_address")
            .map(|s| normalize_server_address(s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());

        let request_timeout_secs = config
            .get("request_timeout_secs")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            server_address,
            auth_token: config.get("auth_token").cloned().filter(|t| !t.is_empty()),
            request_timeout_secs,
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Reads configuration from a TOML file.
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;

        let mut config: Self = toml::from_str(&text)
            .map_err(|e| PhotodeckError::Config(format!("{}: {e}", path.display())))?;
        config.server_address = normalize_server_address(&config.server_address);

        tracing::debug!(path = %path.display(), server_address = %config.server_address, "loaded config file");
        Ok(config)
    }

    /// Applies `overrides` on top of `self`. Keys absent from the map keep their value.
    #[must_use]
    pub fn merged_with(mut self, overrides: &BTreeMap<String, String>) -> Self {
        let parsed = Self::from_map(overrides);
        if overrides.contains_key("server_address") {
            self.server_address = parsed.server_address;
        }
        if overrides.contains_key("auth_token") {
            self.auth_token = parsed.auth_token;
        }
        if overrides.contains_key("request_timeout_secs") {
            self.request_timeout_secs = parsed.request_timeout_secs;
        }
        if overrides.contains_key("trace_level") {
            self.trace_level = parsed.trace_level;
        }
        self
    }
}

fn normalize_server_address(address: &str) -> String {
    address.trim().trim_end_matches('/').to_string()
}

/// Creates the initial application state.
///
/// The selection is empty, no route is set and no photo is open.
///
/// # Example
///
/// ```rust
/// use photodeck::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.server_address, "http://localhost:8000");
/// assert!(state.selection.is_empty());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(server_address = %config.server_address, "initializing photodeck");
    AppState::new(config.server_address.clone())
}
