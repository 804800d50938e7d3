//! Command-line entry point.
//!
//! A thin shim over the library: it turns `key=value` arguments into events,
//! runs them through a [`Runtime`] backed by the HTTP service, and prints the
//! resulting menu or sidebar.
//!
//! # Usage
//!
//! ```text
//! photodeck [config=PATH] [server_address=URL] [auth_token=TOKEN] [trace_level=LEVEL]
//!           [route=PATH] [album_id=ID album_title=TITLE] [public=true]
//!           [select=ID,v:ID,...] [action=NAME] [photo=HASH]
//! ```
//!
//! Without `action` or `photo` the selection menu is printed. `select` takes
//! comma-separated ids; a `v:` prefix marks a video. Action names are the
//! kebab-case names of [`BulkAction`], e.g. `make-public` or `remove-from-album`.
//!
//! # Examples
//!
//! ```text
//! photodeck route=/useralbum/7 album_id=7 album_title=Summer select=a1,a2 action=remove-from-album
//! photodeck select=a1 action=make-public
//! photodeck photo=0f3c9e
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::io;
use std::process::ExitCode;
use std::sync::mpsc;

use photodeck::app::{AlbumCoverKind, Notification};
use photodeck::infrastructure::{expand_tilde, Osc52Clipboard};
use photodeck::service::{HttpMutationService, MutationRequest, MutationWorker, ServiceResponse};
use photodeck::ui::{render_menu, render_sidebar};
use photodeck::{
    AlbumRef, BulkAction, Config, Effect, Event, ParentCallbacks, PhotoDetail,
    PhotodeckError, Result, RouteContext, Runtime, SelectedItem,
};

/// Prints parent callbacks instead of opening dialogs.
struct PrintCallbacks;

impl ParentCallbacks for PrintCallbacks {
    fn share_photos(&mut self) {
        eprintln!("-> share photos");
    }

    fn share_album(&mut self) {
        eprintln!("-> share album");
    }

    fn add_to_album(&mut self) {
        eprintln!("-> add to album");
    }

    fn set_album_cover(&mut self, kind: AlbumCoverKind) {
        eprintln!("-> set {kind} cover");
    }

    fn notify(&mut self, notification: Notification) {
        eprintln!("{}", notification.message());
    }
}

fn main() -> ExitCode {
    match run(std::env::args().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("photodeck: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: impl Iterator<Item = String>) -> Result<()> {
    let args = parse_args(args)?;

    let config = match args.get("config") {
        Some(path) => Config::from_file(expand_tilde(path))?.merged_with(&args),
        None => Config::from_map(&args),
    };
    photodeck::observability::init_tracing(&config);

    let span = tracing::debug_span!("photodeck_run");
    let _guard = span.entered();

    let mut state = photodeck::initialize(&config);
    for event in initial_events(&args)? {
        photodeck::handle_event(&mut state, &event)?;
    }

    let action = args
        .get("action")
        .map(|name| name.parse::<BulkAction>().map_err(PhotodeckError::Config))
        .transpose()?;
    let photo = args.get("photo");

    if action.is_none() && photo.is_none() {
        print!("{}", render_menu(&state.compute_menu_viewmodel()));
        return Ok(());
    }

    let (outcome_tx, outcome_rx) = mpsc::channel();
    let service = HttpMutationService::new(&config)?;
    let worker = MutationWorker::spawn(Box::new(service), Some(outcome_tx))?;
    let mut runtime = Runtime::new(worker, Osc52Clipboard::new(io::stdout()), PrintCallbacks);

    if let Some(action) = action {
        runtime.dispatch(&mut state, &Event::InvokeBulk(action))?;
    }
    if let Some(hash) = photo {
        runtime.dispatch(&mut state, &Event::OpenPhoto(PhotoDetail::new(hash.clone())))?;
        runtime.execute(&Effect::Submit(MutationRequest::refresh_photo_details(hash.clone())));
    }

    runtime.shutdown()?;

    for response in outcome_rx.iter() {
        report(&response);
        photodeck::handle_event(&mut state, &Event::ServiceResponse(response))?;
    }

    if photo.is_some() {
        if let Some(sidebar) = state.compute_sidebar_viewmodel() {
            print!("{}", render_sidebar(&sidebar));
        }
    } else {
        print!("{}", render_menu(&state.compute_menu_viewmodel()));
    }

    Ok(())
}

/// Splits `key=value` arguments. Later keys win.
fn parse_args(args: impl Iterator<Item = String>) -> Result<BTreeMap<String, String>> {
    args.map(|arg| {
        arg.split_once('=')
            .map(|(key, value)| (key.trim().to_string(), value.to_string()))
            .ok_or_else(|| PhotodeckError::Config(format!("expected key=value, got `{arg}`")))
    })
    .collect()
}

/// Events that put the state where the arguments describe.
fn initial_events(args: &BTreeMap<String, String>) -> Result<Vec<Event>> {
    let mut events = Vec::new();

    if let Some(route) = args.get("route") {
        events.push(Event::RouteChanged(RouteContext::new(route.clone())));
    }

    if let Some(id) = args.get("album_id") {
        let id = id
            .parse::<u64>()
            .map_err(|e| PhotodeckError::Config(format!("album_id `{id}`: {e}")))?;
        let title = args.get("album_title").cloned().unwrap_or_default();
        events.push(Event::AlbumChanged(Some(AlbumRef::new(id, title))));
    }

    if let Some(public) = args.get("public") {
        events.push(Event::SetPublicView(matches!(public.as_str(), "true" | "1" | "yes")));
    }

    if let Some(ids) = args.get("select") {
        let items: Vec<SelectedItem> = ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                id.strip_prefix("v:")
                    .map_or_else(|| SelectedItem::image(id), SelectedItem::video)
            })
            .collect();
        events.push(Event::SelectItems(items));
    }

    Ok(events)
}

fn report(response: &ServiceResponse) {
    match response {
        ServiceResponse::Completed { operation, item_count } => {
            eprintln!("{operation}: {item_count} item(s) done");
        }
        ServiceResponse::PhotoDetailsLoaded { detail } => {
            eprintln!("loaded details for {}", detail.image_hash);
        }
        ServiceResponse::Error { operation, message } => {
            eprintln!("{operation} failed: {message}");
        }
    }
}
