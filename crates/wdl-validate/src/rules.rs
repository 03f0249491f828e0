//! The built-in validation rules.
//!
//! Each rule is an independent function from a world to a list of
//! issues; rules never see each other's output. The documented run
//! order only fixes the ordering of issues in the report.

use std::collections::HashSet;

use wdl_core::{EntityId, EntityKind, World};

use crate::issue::Issue;

/// Flag every entity whose id repeats one already seen. The first
/// occurrence is not flagged.
pub fn unique_entity_ids(world: &World) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<EntityId> = HashSet::new();

    for entity in world.entities() {
        if !seen.insert(entity.id) {
            issues.push(Issue::error(format!("Duplicate entity ID: {}", entity.id)).for_entity(entity.id));
        }
    }

    issues
}

/// Flag entities whose `parent_id` does not resolve to any entity.
pub fn parent_references(world: &World) -> Vec<Issue> {
    let mut issues = Vec::new();
    let ids = world.entity_ids();

    for entity in world.entities() {
        if let Some(parent) = entity.parent_id
            && !ids.contains(&parent)
        {
            issues.push(
                Issue::error(format!(
                    "Entity '{}' references non-existent parent: {parent}",
                    entity.name
                ))
                .for_entity(entity.id)
                .at_field("parent_id"),
            );
        }
    }

    issues
}

/// Flag entities positioned outside the world bounds. Positions exactly
/// on a boundary plane are valid.
pub fn entity_bounds(world: &World) -> Vec<Issue> {
    let mut issues = Vec::new();

    for entity in world.entities() {
        if !world.bounds.contains(entity.transform.position) {
            issues.push(
                Issue::warning(format!("Entity '{}' is outside world bounds", entity.name))
                    .for_entity(entity.id)
                    .at_field("transform.position"),
            );
        }
    }

    issues
}

/// Flag lights with suspiciously high intensity (> 100).
pub fn light_intensity(world: &World) -> Vec<Issue> {
    let mut issues = Vec::new();

    for light in world.lights() {
        if light.intensity > 100.0 {
            issues.push(
                Issue::warning(format!(
                    "Light '{}' has unusually high intensity: {}",
                    light.name, light.intensity
                ))
                .at_field("intensity"),
            );
        }
    }

    issues
}

/// Flag interactions whose `target_entity_id` does not resolve to any
/// entity.
pub fn system_references(world: &World) -> Vec<Issue> {
    let mut issues = Vec::new();
    let ids = world.entity_ids();

    for system in world.systems() {
        for interaction in &system.interactions {
            if let Some(target) = interaction.target_entity_id
                && !ids.contains(&target)
            {
                issues.push(
                    Issue::error(format!(
                        "System '{}' references non-existent entity: {target}",
                        system.name
                    ))
                    .at_field("interactions.target_entity_id"),
                );
            }
        }
    }

    issues
}

/// Flag physics misconfigurations: enabled bodies with zero mass
/// (warning) and dynamic objects without physics (info — expected, not
/// required).
pub fn physics_sanity(world: &World) -> Vec<Issue> {
    let mut issues = Vec::new();

    for entity in world.entities() {
        if entity.physics.enabled && entity.physics.mass == 0.0 {
            issues.push(
                Issue::warning(format!(
                    "Entity '{}' has physics enabled but zero mass",
                    entity.name
                ))
                .for_entity(entity.id)
                .at_field("physics.mass"),
            );
        }

        if entity.kind == EntityKind::DynamicObject && !entity.physics.enabled {
            issues.push(
                Issue::info(format!(
                    "Dynamic object '{}' does not have physics enabled",
                    entity.name
                ))
                .for_entity(entity.id)
                .at_field("physics.enabled"),
            );
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Severity;
    use wdl_core::{Entity, Light, LightKind, PhysicsSettings, Vector3, WorldMeta};

    fn test_world() -> World {
        World::new(WorldMeta::new("Rules fixture"))
    }

    #[test]
    fn duplicate_ids_flag_repeats_only() {
        let mut world = test_world();
        let id = EntityId::new();
        world.add_entity(Entity::with_id(id, EntityKind::Prop, "A"));
        world.add_entity(Entity::with_id(id, EntityKind::Prop, "B"));
        world.add_entity(Entity::with_id(id, EntityKind::Prop, "C"));
        world.add_entity(Entity::new(EntityKind::Prop, "D"));

        let issues = unique_entity_ids(&world);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
    }

    #[test]
    fn dangling_parent_is_an_error() {
        let mut world = test_world();
        world.add_entity(Entity::new(EntityKind::Prop, "Orphan").with_parent(EntityId::new()));
        let issues = parent_references(&world);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field_path.as_deref(), Some("parent_id"));
    }

    #[test]
    fn resolvable_parent_is_clean() {
        let mut world = test_world();
        let parent = world.add_entity(Entity::new(EntityKind::Terrain, "Ground"));
        world.add_entity(Entity::new(EntityKind::Prop, "Child").with_parent(parent));
        assert!(parent_references(&world).is_empty());
    }

    #[test]
    fn boundary_position_is_inside() {
        let mut world = test_world();
        world.add_entity(Entity::new(EntityKind::Prop, "Edge").at(Vector3::new(
            1000.0, 500.0, 1000.0,
        )));
        world.add_entity(Entity::new(EntityKind::Prop, "Out").at(Vector3::new(
            1000.5, 0.0, 0.0,
        )));
        let issues = entity_bounds(&world);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("Out"));
    }

    #[test]
    fn high_intensity_warns() {
        let mut world = test_world();
        world.add_light(Light::new(LightKind::Point, "Nova").with_intensity(150.0));
        world.add_light(Light::new(LightKind::Point, "Lamp").with_intensity(100.0));
        let issues = light_intensity(&world);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("Nova"));
    }

    #[test]
    fn zero_mass_warns_and_disabled_dynamic_informs() {
        let mut world = test_world();
        world.add_entity(
            Entity::new(EntityKind::Prop, "Ghost").with_physics(PhysicsSettings::dynamic(0.0)),
        );
        world.add_entity(Entity::new(EntityKind::DynamicObject, "Inert"));

        let issues = physics_sanity(&world);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("zero mass"));
        assert_eq!(issues[1].severity, Severity::Info);
        assert!(issues[1].message.contains("Inert"));
    }
}
