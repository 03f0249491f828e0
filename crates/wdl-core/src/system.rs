use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{EntityId, MetadataValue};

/// Unique identifier for a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemId(pub Uuid);

impl SystemId {
    /// Generate a new random system ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SystemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a player or the simulation does to fire an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    Click,
    Hover,
    Collision,
    Proximity,
    Grab,
    Use,
}

impl TriggerKind {
    /// All kinds, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Click,
        Self::Hover,
        Self::Collision,
        Self::Proximity,
        Self::Grab,
        Self::Use,
    ];

    /// Parse a tag into a kind; unrecognized tags fall back to
    /// [`TriggerKind::Use`].
    pub fn parse(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_tag() == tag)
            .unwrap_or(Self::Use)
    }

    /// The snake_case tag used in the canonical form.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Hover => "hover",
            Self::Collision => "collision",
            Self::Proximity => "proximity",
            Self::Grab => "grab",
            Self::Use => "use",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// What happens in response to a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Spawn,
    Destroy,
    Move,
    Rotate,
    Animate,
    PlaySound,
    TriggerEvent,
    SetProperty,
    Teleport,
}

impl ActionKind {
    /// All kinds, in canonical order.
    pub const ALL: [Self; 9] = [
        Self::Spawn,
        Self::Destroy,
        Self::Move,
        Self::Rotate,
        Self::Animate,
        Self::PlaySound,
        Self::TriggerEvent,
        Self::SetProperty,
        Self::Teleport,
    ];

    /// Parse a tag into a kind; unrecognized tags fall back to
    /// [`ActionKind::TriggerEvent`].
    pub fn parse(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_tag() == tag)
            .unwrap_or(Self::TriggerEvent)
    }

    /// The snake_case tag used in the canonical form.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Spawn => "spawn",
            Self::Destroy => "destroy",
            Self::Move => "move",
            Self::Rotate => "rotate",
            Self::Animate => "animate",
            Self::PlaySound => "play_sound",
            Self::TriggerEvent => "trigger_event",
            Self::SetProperty => "set_property",
            Self::Teleport => "teleport",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// A single trigger→action rule inside a system.
///
/// `target_entity_id` is a weak reference; the validator reports targets
/// that do not resolve to an entity in the owning world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(rename = "trigger_type")]
    pub trigger: TriggerKind,
    #[serde(rename = "action_type")]
    pub action: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_entity_id: Option<EntityId>,
    /// Free-form action parameters, ordered by key.
    #[serde(default)]
    pub parameters: BTreeMap<String, MetadataValue>,
}

impl Interaction {
    /// Create an interaction with no target and no parameters.
    pub fn new(trigger: TriggerKind, action: ActionKind) -> Self {
        Self {
            trigger,
            action,
            target_entity_id: None,
            parameters: BTreeMap::new(),
        }
    }

    /// Set the weak target reference.
    pub fn targeting(mut self, target: EntityId) -> Self {
        self.target_entity_id = Some(target);
        self
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: MetadataValue) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

/// A named bundle of interaction rules layered over entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    #[serde(default)]
    pub id: SystemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Higher values are more significant; ordering semantics are left to
    /// the consuming engine.
    #[serde(default)]
    pub priority: i32,
    /// Free-form activation conditions, ordered by key.
    #[serde(default)]
    pub conditions: BTreeMap<String, MetadataValue>,
}

fn default_true() -> bool {
    true
}

impl System {
    /// Create an enabled, priority-0 system with no interactions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SystemId::new(),
            name: name.into(),
            description: String::new(),
            interactions: Vec::new(),
            enabled: true,
            priority: 0,
            conditions: BTreeMap::new(),
        }
    }

    /// Set the description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an interaction, preserving insertion order.
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_system_is_enabled() {
        let system = System::new("Door logic");
        assert!(system.enabled);
        assert_eq!(system.priority, 0);
        assert!(system.interactions.is_empty());
    }

    #[test]
    fn interactions_keep_insertion_order() {
        let system = System::new("Sequence")
            .with_interaction(Interaction::new(TriggerKind::Click, ActionKind::Animate))
            .with_interaction(Interaction::new(TriggerKind::Click, ActionKind::PlaySound));
        assert_eq!(system.interactions[0].action, ActionKind::Animate);
        assert_eq!(system.interactions[1].action, ActionKind::PlaySound);
    }

    #[test]
    fn tag_round_trip_for_every_action() {
        for action in ActionKind::ALL {
            assert_eq!(ActionKind::parse(action.as_tag()), action);
        }
        assert_eq!(ActionKind::parse("explode"), ActionKind::TriggerEvent);
    }

    #[test]
    fn trigger_fallback_is_use() {
        assert_eq!(TriggerKind::parse("stare"), TriggerKind::Use);
    }
}
