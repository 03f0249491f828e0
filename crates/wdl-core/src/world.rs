use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind};
use crate::environment::Environment;
use crate::error::{WdlError, WdlResult};
use crate::light::Light;
use crate::math::Vector3;
use crate::query::Query;
use crate::system::System;

/// Axis-aligned boundary of the playable world volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldBounds {
    pub min_bounds: Vector3,
    pub max_bounds: Vector3,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_bounds: Vector3::new(-1000.0, -100.0, -1000.0),
            max_bounds: Vector3::new(1000.0, 500.0, 1000.0),
        }
    }
}

impl WorldBounds {
    /// Per-axis inclusive containment test; a position exactly on a
    /// boundary plane counts as inside.
    pub fn contains(&self, position: Vector3) -> bool {
        position.x >= self.min_bounds.x
            && position.x <= self.max_bounds.x
            && position.y >= self.min_bounds.y
            && position.y <= self.max_bounds.y
            && position.z >= self.min_bounds.z
            && position.z <= self.max_bounds.z
    }
}

/// Descriptive metadata about the world itself.
///
/// `title` is the only required field of the whole canonical form; a
/// document without it fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldMeta {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_platforms")]
    pub target_platforms: Vec<String>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_platforms() -> Vec<String> {
    vec![
        "unity".to_string(),
        "unreal".to_string(),
        "horizon".to_string(),
    ]
}

impl WorldMeta {
    /// Create metadata with the given title and defaults everywhere else.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            description: String::new(),
            author: String::new(),
            version: default_version(),
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            target_platforms: default_platforms(),
        }
    }
}

/// The root aggregate: metadata, environment, entities, lights, systems,
/// and bounds.
///
/// Entities, lights, and systems are insertion-ordered lists; the order is
/// significant (system priority resolution happens downstream) and
/// survives serialization. The world exclusively owns its collections —
/// state is built through the append operations, never by other components
/// reaching in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    #[serde(rename = "metadata")]
    pub meta: WorldMeta,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    entities: Vec<Entity>,
    #[serde(default)]
    lights: Vec<Light>,
    #[serde(default)]
    systems: Vec<System>,
    #[serde(default)]
    pub bounds: WorldBounds,
}

impl World {
    /// Create an empty world with the given metadata and default
    /// environment and bounds.
    pub fn new(meta: WorldMeta) -> Self {
        Self {
            meta,
            environment: Environment::default(),
            entities: Vec::new(),
            lights: Vec::new(),
            systems: Vec::new(),
            bounds: WorldBounds::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Append operations
    // -----------------------------------------------------------------------

    /// Append an entity. No referential checks happen here — a child may
    /// be added before its parent; dangling references are the
    /// validator's concern. Returns the entity's id.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Append a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Append a system.
    pub fn add_system(&mut self, system: System) {
        self.systems.push(system);
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// All entities, in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// All lights, in insertion order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// All systems, in insertion order.
    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    /// Find an entity by id. With duplicate ids (invalid but
    /// representable), the first occurrence in list order wins.
    pub fn entity_by_id(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// All entities of a kind, in world order.
    pub fn entities_by_kind(&self, kind: EntityKind) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.kind == kind).collect()
    }

    /// All entities carrying a tag, in world order.
    pub fn entities_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.has_tag(tag)).collect()
    }

    /// The set of all entity ids, for reference-integrity checks.
    pub fn entity_ids(&self) -> HashSet<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    /// Start building a filtered entity query.
    pub fn query(&self) -> Query<'_> {
        Query::new(self)
    }

    // -----------------------------------------------------------------------
    // Counts
    // -----------------------------------------------------------------------

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    // -----------------------------------------------------------------------
    // Canonical form
    // -----------------------------------------------------------------------

    /// Serialize to the canonical pretty-printed JSON form.
    ///
    /// Convention: optional fields that are `None` are omitted entirely;
    /// everything else is written out with its documented name, enums as
    /// their snake_case string tag, lists as ordered arrays.
    pub fn to_json(&self) -> WdlResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WdlError::Serialize(e.to_string()))
    }

    /// Deserialize from the canonical JSON form.
    ///
    /// Absent optional fields are filled with their documented defaults.
    /// Malformed JSON, unknown enum tags, out-of-range numeric values,
    /// and a missing `metadata.title` all produce [`WdlError::Parse`].
    pub fn from_json(json: &str) -> WdlResult<Self> {
        serde_json::from_str(json).map_err(|e| WdlError::Parse(e.to_string()))
    }
}
