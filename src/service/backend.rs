//! Mutation service abstraction.
//!
//! The [`MutationService`] trait is the seam between the worker thread and the
//! remote photo server. The worker owns exactly one implementation and calls it
//! sequentially.

use crate::domain::error::Result;
use crate::service::messages::{MutationRequest, ServiceResponse};

/// Executes batched mutation requests against the photo server.
///
/// # Implementations
///
/// - [`HttpMutationService`](crate::service::HttpMutationService): REST client
///   over `reqwest`'s blocking API
///
/// # Examples
///
/// ```
/// use photodeck::service::{MutationRequest, MutationService, ServiceResponse};
///
/// struct Discard;
///
/// impl MutationService for Discard {
///     fn execute(&mut self, request: &MutationRequest) -> photodeck::Result<ServiceResponse> {
///         Ok(ServiceResponse::Completed {
///             operation: request.operation().to_string(),
///             item_count: request.item_count(),
///         })
///     }
/// }
/// ```
pub trait MutationService: Send {
    /// Performs one request and reports what the server answered.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent or the server
    /// rejected it.
    fn execute(&mut self, request: &MutationRequest) -> Result<ServiceResponse>;
}
