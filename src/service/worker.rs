//! Background worker executing mutation requests off the event thread.
//!
//! Posting a request never blocks and never reports the outcome to the poster.
//! The worker runs requests one after another against its
//! [`MutationService`] and optionally forwards each outcome to a listener,
//! typically the host's global notification mechanism.

use crate::domain::error::{PhotodeckError, Result};
use crate::service::backend::MutationService;
use crate::service::messages::{MutationRequest, ServiceResponse};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Name given to the worker thread.
const WORKER_THREAD_NAME: &str = "photodeck-mutations";

/// Handle to the mutation worker thread.
///
/// Dropping the handle closes the request channel; the thread exits once the
/// queued requests are drained. Use [`MutationWorker::shutdown`] to wait for
/// that to happen.
#[derive(Debug)]
pub struct MutationWorker {
    sender: Sender<MutationRequest>,
    handle: Option<JoinHandle<()>>,
}

impl MutationWorker {
    /// Starts the worker thread.
    ///
    /// # Parameters
    ///
    /// * `service` - Backend that performs the requests
    /// * `outcomes` - Optional listener receiving one [`ServiceResponse`] per request
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(
        service: Box<dyn MutationService>,
        outcomes: Option<Sender<ServiceResponse>>,
    ) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();

        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run(service, &receiver, outcomes.as_ref()))?;

        tracing::debug!(thread = WORKER_THREAD_NAME, "mutation worker started");

        Ok(Self {
            sender,
            handle: Some(handle),
        })
    }

    /// Queues a request without waiting for it.
    ///
    /// A closed channel is logged and otherwise ignored; the caller never
    /// learns whether the request ran.
    pub fn post(&self, request: MutationRequest) {
        let operation = request.operation();
        let item_count = request.item_count();

        if let Err(e) = self.sender.send(request) {
            tracing::error!(operation, error = %e, "mutation worker is gone, request dropped");
            return;
        }

        tracing::debug!(operation, item_count, "request posted to worker");
    }

    /// Closes the request channel and waits for queued requests to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread panicked.
    pub fn shutdown(mut self) -> Result<()> {
        let handle = self.handle.take();
        drop(self);

        match handle {
            Some(handle) => handle
                .join()
                .map_err(|_| PhotodeckError::Worker("mutation worker panicked".to_string())),
            None => Ok(()),
        }
    }
}

/// Worker thread body: drains the channel until every sender is gone.
fn run(
    mut service: Box<dyn MutationService>,
    receiver: &Receiver<MutationRequest>,
    outcomes: Option<&Sender<ServiceResponse>>,
) {
    while let Ok(request) = receiver.recv() {
        let response = handle_request(service.as_mut(), &request);

        if let Some(listener) = outcomes {
            if listener.send(response).is_err() {
                tracing::debug!("outcome listener dropped");
            }
        }
    }

    tracing::debug!("mutation worker stopped");
}

/// Executes one request under a span linked to the dispatching span.
pub(crate) fn handle_request(
    service: &mut dyn MutationService,
    request: &MutationRequest,
) -> ServiceResponse {
    let _context_guard = attach_parent_trace_context(request);

    let span = tracing::debug_span!(
        "worker_handle_request",
        operation = request.operation(),
        item_count = request.item_count()
    );
    let _guard = span.entered();

    match service.execute(request) {
        Ok(response) => {
            tracing::debug!(operation = request.operation(), "request completed");
            response
        }
        Err(e) => {
            tracing::error!(operation = request.operation(), error = %e, "request failed");
            ServiceResponse::Error {
                operation: request.operation().to_string(),
                message: e.to_string(),
            }
        }
    }
}

/// Re-attaches the trace context captured when the request was built.
///
/// The returned guard must be held while the request runs.
fn attach_parent_trace_context(request: &MutationRequest) -> Option<opentelemetry::ContextGuard> {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

    let trace_context = request.trace_context()?;

    let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
    let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

    let span_context = SpanContext::new(
        trace_id,
        span_id,
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    );

    let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

    Some(otel_context.attach())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rejecting;

    impl MutationService for Rejecting {
        fn execute(&mut self, request: &MutationRequest) -> Result<ServiceResponse> {
            Err(PhotodeckError::Service {
                endpoint: request.operation().to_string(),
                status: 403,
            })
        }
    }

    struct Accepting(Vec<MutationRequest>);

    impl MutationService for Accepting {
        fn execute(&mut self, request: &MutationRequest) -> Result<ServiceResponse> {
            self.0.push(request.clone());
            Ok(ServiceResponse::Completed {
                operation: request.operation().to_string(),
                item_count: request.item_count(),
            })
        }
    }

    #[test]
    fn failures_become_error_responses() {
        let request = MutationRequest::mark_deleted(vec!["a".into()], true);
        let response = handle_request(&mut Rejecting, &request);
        assert!(matches!(
            response,
            ServiceResponse::Error { ref operation, ref message }
                if operation == "mark deleted" && message.contains("403")
        ));
    }

    #[test]
    fn worker_reports_every_outcome_in_order() {
        let (tx, rx) = mpsc::channel();
        let worker = MutationWorker::spawn(Box::new(Accepting(Vec::new())), Some(tx)).unwrap();

        worker.post(MutationRequest::set_favorite(vec!["a".into()], true));
        worker.post(MutationRequest::set_hidden(vec!["a".into(), "b".into()], false));
        worker.shutdown().unwrap();

        let outcomes: Vec<ServiceResponse> = rx.iter().collect();
        assert_eq!(
            outcomes,
            vec![
                ServiceResponse::Completed { operation: "set favorite".into(), item_count: 1 },
                ServiceResponse::Completed { operation: "set hidden".into(), item_count: 2 },
            ]
        );
    }

    /// Span exporter that keeps finished spans in memory.
    #[derive(Debug, Clone, Default)]
    struct Collected(std::sync::Arc<std::sync::Mutex<Vec<opentelemetry_sdk::export::trace::SpanData>>>);

    impl opentelemetry_sdk::export::trace::SpanExporter for Collected {
        fn export(
            &mut self,
            batch: Vec<opentelemetry_sdk::export::trace::SpanData>,
        ) -> futures_util::future::BoxFuture<'static, opentelemetry_sdk::export::trace::ExportResult>
        {
            self.0.lock().unwrap().extend(batch);
            Box::pin(futures_util::future::ready(Ok(())))
        }
    }

    #[test]
    fn worker_span_joins_dispatching_trace() {
        use opentelemetry::trace::TracerProvider as _;
        use tracing_subscriber::layer::SubscriberExt;

        let collected = Collected::default();
        let provider = opentelemetry_sdk::trace::TracerProvider::builder()
            .with_simple_exporter(collected.clone())
            .build();
        let subscriber = tracing_subscriber::registry()
            .with(tracing_opentelemetry::layer().with_tracer(provider.tracer("photodeck-test")));

        let (request, context) = tracing::subscriber::with_default(subscriber, || {
            let request = {
                let _dispatch = tracing::info_span!("dispatch").entered();
                MutationRequest::set_hidden(vec!["a".into()], true)
            };
            let context = request.trace_context().cloned();

            handle_request(&mut Accepting(Vec::new()), &request);
            (request, context)
        });

        let context = context.expect("request built inside a span carries its context");
        assert_eq!(request.trace_context(), Some(&context));

        let spans = collected.0.lock().unwrap();
        let worker_span = spans
            .iter()
            .find(|span| span.name == "worker_handle_request")
            .expect("worker span exported");

        assert_eq!(format!("{:016x}", worker_span.parent_span_id), context.parent_span_id);
        assert_eq!(
            format!("{:032x}", worker_span.span_context.trace_id()),
            context.trace_id
        );
    }
}
