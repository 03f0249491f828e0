//! A small, deterministic demo world.
//!
//! Used by `wdl init` to seed a new project and by tests that need a
//! fully-populated world. Ids are freshly generated per call; everything
//! else is fixed.

use crate::entity::{Entity, EntityKind, MetadataValue};
use crate::environment::Weather;
use crate::light::{Light, LightKind};
use crate::material::{Material, MaterialKind};
use crate::math::{Color, Transform, Vector3};
use crate::physics::{Collider, PhysicsSettings};
use crate::system::{ActionKind, Interaction, System, TriggerKind};
use crate::world::{World, WorldMeta};

/// Build the demo world: a forest clearing with terrain, a few props, a
/// sun, and one interaction system.
pub fn demo_world() -> World {
    let mut meta = WorldMeta::new("Forest Clearing");
    meta.description = "A quiet clearing with ancient trees and a campfire".to_string();
    meta.author = "wdl".to_string();
    meta.tags = vec!["nature".to_string(), "demo".to_string()];

    let mut world = World::new(meta);
    world.environment.weather = Weather::Foggy;
    world.environment.fog_enabled = true;
    world.environment.fog_density = 0.02;
    world.environment.time_of_day.hour = 17;
    world.environment.time_of_day.minute = 30;

    let ground = world.add_entity(
        Entity::new(EntityKind::Terrain, "ForestGround")
            .with_transform(Transform::default().scaled(Vector3::new(200.0, 1.0, 200.0)))
            .with_material(
                Material::new("ForestFloor")
                    .with_kind(MaterialKind::Pbr)
                    .with_base_color(Color { r: 0.2, g: 0.15, b: 0.1, a: 1.0 })
                    .with_texture("textures/forest_floor_diffuse.png"),
            )
            .tagged(["terrain", "ground"]),
    );

    let tree_positions = [
        (10.0, 10.0),
        (-15.0, 5.0),
        (20.0, -10.0),
        (-10.0, -15.0),
    ];
    for (index, (x, z)) in tree_positions.into_iter().enumerate() {
        world.add_entity(
            Entity::new(EntityKind::StaticMesh, format!("AncientTree_{index}"))
                .with_transform(
                    Transform::at(Vector3::new(x, 0.0, z))
                        .rotated(Vector3::new(0.0, index as f64 * 45.0, 0.0))
                        .scaled(Vector3::new(1.5, 2.0, 1.5)),
                )
                .with_parent(ground)
                .tagged(["vegetation", "tree"]),
        );
    }

    let campfire = world.add_entity(
        Entity::new(EntityKind::Prop, "Campfire")
            .at(Vector3::new(0.0, 0.0, 0.0))
            .with_material(
                Material::new("Embers")
                    .with_kind(MaterialKind::Emissive)
                    .with_base_color(Color { r: 0.9, g: 0.4, b: 0.1, a: 1.0 }),
            )
            .with_physics(PhysicsSettings::dynamic(4.0))
            .with_collider(Collider::sphere(0.8))
            .tagged(["interactive"]),
    );

    world.add_entity(
        Entity::new(EntityKind::SpawnPoint, "PlayerSpawn").at(Vector3::new(0.0, 1.0, -10.0)),
    );

    world.add_light(
        Light::new(LightKind::Directional, "Sun")
            .with_color(Color { r: 1.0, g: 0.95, b: 0.9, a: 1.0 })
            .with_intensity(1.2)
            .with_transform(Transform::default().rotated(Vector3::new(50.0, -30.0, 0.0))),
    );
    world.add_light(
        Light::new(LightKind::Point, "CampfireGlow")
            .with_color(Color { r: 1.0, g: 0.6, b: 0.2, a: 1.0 })
            .with_transform(Transform::at(Vector3::new(0.0, 1.0, 0.0))),
    );

    world.add_system(
        System::new("Campfire ignition")
            .describe("Lights the campfire when the player uses it")
            .with_interaction(
                Interaction::new(TriggerKind::Use, ActionKind::PlaySound)
                    .targeting(campfire)
                    .with_parameter("sound", MetadataValue::String("fire_crackle".to_string())),
            )
            .with_interaction(
                Interaction::new(TriggerKind::Use, ActionKind::Animate).targeting(campfire),
            )
            .with_priority(5),
    );

    world
}
