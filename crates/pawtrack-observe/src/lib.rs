//! Observability for Pawtrack: tracing subscriber setup with optional
//! OpenTelemetry export. Assistant spans follow the OTel GenAI semantic
//! conventions (`gen_ai.*` field names, spelled inline at the span sites
//! since `tracing` macros take field names literally).

pub mod tracing_setup;
