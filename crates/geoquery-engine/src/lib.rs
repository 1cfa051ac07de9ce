//! geoquery-engine - Spatial engine gateway and operation dispatcher
//!
//! Owns the single PostGIS session (lazily created, single-flight, reset on
//! failure), the per-operation SQL builders, and the guard applied to
//! translator-supplied SQL before execution.

pub mod config;
pub mod dispatch;
pub mod guard;
pub mod operations;
pub mod session;

pub use config::{EngineConfig, PoolConfig};
pub use dispatch::dispatch;
pub use session::SpatialEngine;
