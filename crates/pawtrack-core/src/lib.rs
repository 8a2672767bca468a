//! Business logic for Pawtrack.
//!
//! This crate defines the "ports" (the [`sync::store::RemoteStore`] and
//! [`assistant::provider::AssistantProvider`] traits) that the
//! infrastructure layer implements, the sync engine that keeps the local
//! document mirror reconciled with the remote store, and the purely local
//! care computations. It depends only on `pawtrack-types` -- never on
//! `pawtrack-infra` or any HTTP/IO crate.

pub mod assistant;
pub mod backup;
pub mod care;
pub mod sync;
