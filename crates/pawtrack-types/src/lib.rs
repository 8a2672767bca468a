//! Shared domain types for Pawtrack.
//!
//! This crate contains the document model (the single remote JSON object
//! and its typed fields), assistant request/response shapes, configuration
//! types, and the error enums used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod assistant;
pub mod config;
pub mod document;
pub mod error;
pub mod fields;
