//! Spatial reasoning over WDL worlds.
//!
//! Derives axis-aligned bounding boxes from entity transforms and
//! answers proximity, containment, and collision queries over them,
//! plus a deterministic greedy placement search. Everything here is a
//! bounded, in-memory computation — "no result" outcomes are normal
//! values, never errors.

/// Bounding boxes and distance functions.
pub mod bounds;
/// The spatial reasoner and its aggregate report.
pub mod reasoner;

/// Re-export bounding-box types and distance functions.
pub use bounds::{BoundingBox, distance, distance_squared};
/// Re-export the reasoner and report types.
pub use reasoner::{BoundsSummary, CollisionPair, SpatialReasoner, SpatialReport};
