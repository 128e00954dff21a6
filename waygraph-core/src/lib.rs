//! Core engine for the waygraph road-network routing service.
//!
//! Holds an in-memory directed weighted graph built from extracted map data
//! and answers nearest-node, bounding-box and shortest-path queries over it.
//! The graph is built once at startup and then queried read-only; sharing it
//! across threads requires no locking.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// External node identifier, as assigned by the source map data (OSM).
pub type NodeId = i64;

/// Fallback speed limit in km/h for edges that carry none.
pub const DEFAULT_SPEED_KMH: f64 = 50.0;
