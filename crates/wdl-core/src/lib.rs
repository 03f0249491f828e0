//! Core types for WDL, the World Description Language: an engine-agnostic
//! intermediate representation for 3D worlds.
//!
//! This crate defines the data model and its canonical JSON form. It is
//! independent of any generator — you can construct a [`World`]
//! programmatically, deserialize one from JSON, or coerce one from the
//! loosely-typed output of an upstream authoring pipeline.

/// Best-effort coercion of loosely-typed external data into a world.
pub mod coerce;
/// Entity types, identifiers, and metadata values.
pub mod entity;
/// Weather, time-of-day, skybox, and other world-level settings.
pub mod environment;
/// Error types used throughout the crate.
pub mod error;
/// Light sources and their kinds.
pub mod light;
/// Materials and shading models.
pub mod material;
/// Geometric primitives: vectors, colors, transforms.
pub mod math;
/// Physics settings and collision shapes.
pub mod physics;
/// Query builder for filtering entities.
pub mod query;
/// A deterministic demo world for seeding projects and tests.
pub mod sample;
/// Interaction systems layered over entities.
pub mod system;
/// The world aggregate that owns entities, lights, and systems.
pub mod world;

pub(crate) mod check;

/// Re-export core entity types.
pub use entity::{Entity, EntityId, EntityKind, MetadataValue};
/// Re-export environment types.
pub use environment::{Environment, Weather};
/// Re-export error types.
pub use error::{WdlError, WdlResult};
/// Re-export light types.
pub use light::{Light, LightKind};
/// Re-export material types.
pub use material::{Material, MaterialKind};
/// Re-export geometric primitives.
pub use math::{Color, Transform, Vector3};
/// Re-export physics types.
pub use physics::{Collider, ColliderShape, PhysicsSettings};
/// Re-export system types.
pub use system::{ActionKind, Interaction, System, SystemId, TriggerKind};
/// Re-export world model types.
pub use world::{World, WorldBounds, WorldMeta};
