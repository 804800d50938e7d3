//! Remote photo service access.
//!
//! Mutations are fire-and-forget: the event handler emits
//! [`MutationRequest`]s, the runtime posts them to the [`MutationWorker`], and
//! the worker thread executes them against a [`MutationService`].
//!
//! # Architecture
//!
//! - `messages`: Request/response types with trace context propagation
//! - `backend`: Service trait
//! - `http`: REST implementation over `reqwest`
//! - `worker`: Background thread and non-blocking `post`

pub mod backend;
pub mod http;
pub mod messages;
pub mod worker;

pub use backend::MutationService;
pub use http::HttpMutationService;
pub use messages::{MutationRequest, ServiceResponse, TraceContext};
pub use worker::MutationWorker;
