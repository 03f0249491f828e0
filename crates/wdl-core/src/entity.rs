use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::material::Material;
use crate::math::{Transform, Vector3};
use crate::physics::{Collider, PhysicsSettings};

/// Unique identifier for an entity, generated at construction and stable
/// for the entity's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Generate a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a placeable entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Non-moving geometry: walls, rocks, buildings.
    #[default]
    StaticMesh,
    /// A physics-driven object expected to move at runtime.
    DynamicObject,
    Character,
    Prop,
    /// An invisible volume that fires interactions.
    Trigger,
    SpawnPoint,
    Waypoint,
    Light,
    Camera,
    AudioSource,
    ParticleSystem,
    Terrain,
}

impl EntityKind {
    /// All kinds, in canonical order. Generators iterate this to key
    /// their spawn tables.
    pub const ALL: [Self; 12] = [
        Self::StaticMesh,
        Self::DynamicObject,
        Self::Character,
        Self::Prop,
        Self::Trigger,
        Self::SpawnPoint,
        Self::Waypoint,
        Self::Light,
        Self::Camera,
        Self::AudioSource,
        Self::ParticleSystem,
        Self::Terrain,
    ];

    /// Parse a tag into a kind. Unrecognized tags fall back to
    /// [`EntityKind::StaticMesh`]; the canonical deserialization path
    /// rejects them instead.
    pub fn parse(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_tag() == tag)
            .unwrap_or_default()
    }

    /// The snake_case tag used in the canonical form.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::StaticMesh => "static_mesh",
            Self::DynamicObject => "dynamic_object",
            Self::Character => "character",
            Self::Prop => "prop",
            Self::Trigger => "trigger",
            Self::SpawnPoint => "spawn_point",
            Self::Waypoint => "waypoint",
            Self::Light => "light",
            Self::Camera => "camera",
            Self::AudioSource => "audio_source",
            Self::ParticleSystem => "particle_system",
            Self::Terrain => "terrain",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// A flexible metadata value that supports common types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// A text value.
    String(String),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// An ordered list of metadata values.
    List(Vec<MetadataValue>),
    /// A string-keyed map of metadata values, ordered by key.
    Map(BTreeMap<String, MetadataValue>),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Map(_) => write!(f, "{{...}}"),
        }
    }
}

/// A placeable object node in the world.
///
/// Parent/child links are weak id references resolved through the owning
/// [`crate::World`]; nothing is enforced at construction time, and a child
/// may be added to a world before its parent. Referential integrity is the
/// validator's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "entity_type", default)]
    pub kind: EntityKind,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(default)]
    pub physics: PhysicsSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collider: Option<Collider>,
    /// Weak reference to the parent entity's id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<EntityId>,
    /// Weak references to child entity ids.
    #[serde(default)]
    pub children_ids: Vec<EntityId>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form metadata, ordered by key.
    #[serde(default)]
    pub metadata: BTreeMap<String, MetadataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefab_reference: Option<String>,
}

impl Entity {
    /// Create a new entity with a fresh random ID and default fields.
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::with_id(EntityId::new(), kind, name)
    }

    /// Create an entity with a pre-assigned ID.
    pub fn with_id(id: EntityId, kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            transform: Transform::default(),
            material: None,
            physics: PhysicsSettings::default(),
            collider: None,
            parent_id: None,
            children_ids: Vec::new(),
            tags: Vec::new(),
            metadata: BTreeMap::new(),
            asset_reference: None,
            prefab_reference: None,
        }
    }

    /// Place the entity at a position, keeping rotation and scale.
    pub fn at(mut self, position: Vector3) -> Self {
        self.transform.position = position;
        self
    }

    /// Replace the full transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Attach a material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Replace the physics settings.
    pub fn with_physics(mut self, physics: PhysicsSettings) -> Self {
        self.physics = physics;
        self
    }

    /// Attach a collider.
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Set the weak parent reference.
    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Append tags.
    pub fn tagged<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Returns true if the entity carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
