//! Observability setup for Chatlens: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
