//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK → FileSpanExporter → photodeck-otlp.json
//! ```
//!
//! Spans are exported as OTLP JSON lines, one batch per line, into the data
//! directory. The file rotates at 10 MB and keeps 3 backups.
//!
//! Mutation requests carry the trace context of the span that built them, so
//! the worker thread's spans join the dispatching trace.
//!
//! # Modules
//!
//! - `init`: Subscriber installation
//! - `tracer`: Tracer provider and span exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: Rotating trace file

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
