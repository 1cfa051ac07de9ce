//! geoquery-core - Domain models, geometry codec, and error types
//!
//! This crate contains the canonical geometry representation, the typed
//! operation request/result models, and the error vocabulary shared by all
//! geoquery crates.

pub mod error;
pub mod models;

pub use error::{GeoqueryError, Result};
