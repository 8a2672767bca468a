//! Infrastructure layer for Pawtrack.
//!
//! Contains implementations of the ports defined in `pawtrack-core`:
//! the jsonblob remote store, the Gemini assistant provider, image
//! downscaling, configuration loading, and API-key resolution.

pub mod config;
pub mod gemini;
pub mod jsonblob;
pub mod media;
pub mod secret;
