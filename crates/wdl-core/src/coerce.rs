//! Best-effort construction of a [`World`] from loosely-typed data.
//!
//! The upstream authoring pipeline hands over raw JSON that may be
//! partially malformed. Unlike the strict canonical path
//! ([`World::from_json`]), coercion never fails on a single bad field:
//! unknown enum tags fall back to their documented default variant,
//! out-of-range numbers are clamped, and entries that are not even
//! objects are skipped. Every such downgrade is recorded as a note so
//! the caller can report what was lost. Only input that is not a JSON
//! object at all is a hard failure.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::entity::{Entity, EntityId, EntityKind};
use crate::environment::Weather;
use crate::error::{WdlError, WdlResult};
use crate::light::{Light, LightKind};
use crate::material::{Material, MaterialKind};
use crate::math::{Color, Transform, Vector3};
use crate::system::{ActionKind, Interaction, System, TriggerKind};
use crate::world::{World, WorldMeta};

/// The outcome of a lossy coercion: the world that was salvaged plus a
/// note per downgraded or skipped field.
#[derive(Debug)]
pub struct Coerced {
    pub world: World,
    pub notes: Vec<String>,
}

impl Coerced {
    /// Returns true if the input coerced without any downgrades.
    pub fn is_clean(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Coerce a loose JSON value into a world.
pub fn world_from_value(value: &Value) -> WdlResult<Coerced> {
    let root = value
        .as_object()
        .ok_or_else(|| WdlError::Unusable("top-level value is not an object".to_string()))?;

    let mut notes = Vec::new();

    let meta = coerce_meta(root.get("metadata"), &mut notes);
    let mut world = World::new(meta);
    coerce_environment(&mut world, root.get("environment"), &mut notes);

    if let Some(entities) = root.get("entities").and_then(Value::as_array) {
        for (index, entry) in entities.iter().enumerate() {
            match coerce_entity(entry, index, &mut notes) {
                Some(entity) => {
                    world.add_entity(entity);
                }
                None => notes.push(format!("entities[{index}]: not an object, skipped")),
            }
        }
    }

    if let Some(lights) = root.get("lights").and_then(Value::as_array) {
        for (index, entry) in lights.iter().enumerate() {
            match coerce_light(entry, &mut notes) {
                Some(light) => world.add_light(light),
                None => notes.push(format!("lights[{index}]: not an object, skipped")),
            }
        }
    }

    // A world with no lights at all gets a default sun so downstream
    // targets always have something to render by.
    if world.light_count() == 0 {
        notes.push("no lights defined, adding default sun".to_string());
        world.add_light(
            Light::new(LightKind::Directional, "Sun")
                .with_transform(Transform::default().rotated(Vector3::new(50.0, -30.0, 0.0))),
        );
    }

    if let Some(systems) = root.get("systems").and_then(Value::as_array) {
        for (index, entry) in systems.iter().enumerate() {
            match coerce_system(entry, index, &mut notes) {
                Some(system) => world.add_system(system),
                None => notes.push(format!("systems[{index}]: not an object, skipped")),
            }
        }
    }

    Ok(Coerced { world, notes })
}

fn coerce_meta(value: Option<&Value>, notes: &mut Vec<String>) -> WorldMeta {
    let map = value.and_then(Value::as_object);
    let title = match map.and_then(|m| m.get("title")).and_then(Value::as_str) {
        Some(title) => title.to_string(),
        None => {
            notes.push("metadata.title missing, using \"Untitled World\"".to_string());
            "Untitled World".to_string()
        }
    };

    let mut meta = WorldMeta::new(title);
    if let Some(map) = map {
        if let Some(description) = map.get("description").and_then(Value::as_str) {
            meta.description = description.to_string();
        }
        if let Some(author) = map.get("author").and_then(Value::as_str) {
            meta.author = author.to_string();
        }
        if let Some(version) = map.get("version").and_then(Value::as_str) {
            meta.version = version.to_string();
        }
        if let Some(tags) = map.get("tags").and_then(Value::as_array) {
            meta.tags = string_list(tags);
        }
        if let Some(platforms) = map.get("target_platforms").and_then(Value::as_array) {
            meta.target_platforms = string_list(platforms);
        }
    }
    meta
}

fn coerce_environment(world: &mut World, value: Option<&Value>, notes: &mut Vec<String>) {
    let Some(map) = value.and_then(Value::as_object) else {
        return;
    };

    if let Some(tag) = map.get("weather").and_then(Value::as_str) {
        world.environment.weather = parse_tag(tag, Weather::parse, Weather::as_tag, notes);
    }
    if let Some(time) = map.get("time_of_day").and_then(Value::as_object) {
        if let Some(hour) = time.get("hour").and_then(Value::as_u64) {
            world.environment.time_of_day.hour = clamp_int(hour, 23, "time_of_day.hour", notes);
        }
        if let Some(minute) = time.get("minute").and_then(Value::as_u64) {
            world.environment.time_of_day.minute =
                clamp_int(minute, 59, "time_of_day.minute", notes);
        }
        if let Some(cycle) = time.get("day_night_cycle").and_then(Value::as_bool) {
            world.environment.time_of_day.day_night_cycle = cycle;
        }
    }
    if let Some(enabled) = map.get("fog_enabled").and_then(Value::as_bool) {
        world.environment.fog_enabled = enabled;
    }
    if let Some(color) = map.get("fog_color") {
        world.environment.fog_color = coerce_color(color, world.environment.fog_color, notes);
    }
    if let Some(color) = map.get("ambient_light") {
        world.environment.ambient_light =
            coerce_color(color, world.environment.ambient_light, notes);
    }
    if let Some(gravity) = map.get("gravity") {
        world.environment.gravity = coerce_vector(Some(gravity), world.environment.gravity);
    }
    if let Some(skybox) = map.get("skybox").and_then(Value::as_object)
        && let Some(kind) = skybox
            .get("skybox_type")
            .or_else(|| skybox.get("type"))
            .and_then(Value::as_str)
    {
        world.environment.skybox.skybox_type = kind.to_string();
    }
}

fn coerce_entity(value: &Value, index: usize, notes: &mut Vec<String>) -> Option<Entity> {
    let map = value.as_object()?;

    let name = map
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Entity")
        .to_string();
    let kind = match map.get("entity_type").and_then(Value::as_str) {
        Some(tag) => parse_tag(tag, EntityKind::parse, EntityKind::as_tag, notes),
        None => EntityKind::default(),
    };

    let mut entity = Entity::new(kind, name);
    if let Some(id) = coerce_id(map, notes) {
        entity.id = EntityId(id);
    }
    entity.transform = coerce_transform(map.get("transform"));

    if let Some(material) = map.get("material").and_then(Value::as_object) {
        let name = material
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("default");
        let kind = match material.get("material_type").and_then(Value::as_str) {
            Some(tag) => parse_tag(tag, MaterialKind::parse, MaterialKind::as_tag, notes),
            None => MaterialKind::default(),
        };
        let mut coerced = Material::new(name).with_kind(kind);
        if let Some(color) = material.get("base_color") {
            coerced.base_color = coerce_color(color, coerced.base_color, notes);
        }
        entity.material = Some(coerced);
    }

    if let Some(physics) = map.get("physics").and_then(Value::as_object) {
        if let Some(enabled) = physics.get("enabled").and_then(Value::as_bool) {
            entity.physics.enabled = enabled;
        }
        if let Some(mass) = physics.get("mass").and_then(Value::as_f64) {
            if mass >= 0.0 {
                entity.physics.mass = mass as f32;
            } else {
                notes.push(format!("entities[{index}]: negative mass {mass}, keeping 1.0"));
            }
        }
        if let Some(use_gravity) = physics.get("use_gravity").and_then(Value::as_bool) {
            entity.physics.use_gravity = use_gravity;
        }
    }

    if let Some(tags) = map.get("tags").and_then(Value::as_array) {
        entity.tags = string_list(tags);
    }
    if let Some(asset) = map.get("asset_reference").and_then(Value::as_str) {
        entity.asset_reference = Some(asset.to_string());
    }

    Some(entity)
}

fn coerce_light(value: &Value, notes: &mut Vec<String>) -> Option<Light> {
    let map = value.as_object()?;

    let name = map
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Light")
        .to_string();
    let kind = match map.get("light_type").and_then(Value::as_str) {
        Some(tag) => parse_tag(tag, LightKind::parse, LightKind::as_tag, notes),
        None => LightKind::default(),
    };

    let mut light = Light::new(kind, name);
    if let Some(color) = map.get("color") {
        light.color = coerce_color(color, light.color, notes);
    }
    if let Some(intensity) = map.get("intensity").and_then(Value::as_f64) {
        if intensity >= 0.0 {
            light.intensity = intensity as f32;
        } else {
            notes.push(format!(
                "light \"{}\": negative intensity {intensity}, keeping 1.0",
                light.name
            ));
        }
    }
    if let Some(cast_shadows) = map.get("cast_shadows").and_then(Value::as_bool) {
        light.cast_shadows = cast_shadows;
    }
    light.transform = coerce_transform(map.get("transform"));

    Some(light)
}

fn coerce_system(value: &Value, index: usize, notes: &mut Vec<String>) -> Option<System> {
    let map = value.as_object()?;

    let name = map
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("System")
        .to_string();
    let mut system = System::new(name);
    if let Some(description) = map.get("description").and_then(Value::as_str) {
        system.description = description.to_string();
    }
    if let Some(priority) = map.get("priority").and_then(Value::as_i64) {
        system.priority = priority as i32;
    }
    if let Some(enabled) = map.get("enabled").and_then(Value::as_bool) {
        system.enabled = enabled;
    }

    if let Some(interactions) = map.get("interactions").and_then(Value::as_array) {
        for entry in interactions {
            let Some(interaction) = entry.as_object() else {
                notes.push(format!(
                    "systems[{index}]: interaction entry is not an object, skipped"
                ));
                continue;
            };
            let trigger = match interaction.get("trigger_type").and_then(Value::as_str) {
                Some(tag) => parse_tag(tag, TriggerKind::parse, TriggerKind::as_tag, notes),
                None => TriggerKind::Use,
            };
            let action = match interaction.get("action_type").and_then(Value::as_str) {
                Some(tag) => parse_tag(tag, ActionKind::parse, ActionKind::as_tag, notes),
                None => ActionKind::TriggerEvent,
            };
            let mut coerced = Interaction::new(trigger, action);
            if let Some(target) = interaction.get("target_entity_id").and_then(Value::as_str) {
                match Uuid::parse_str(target) {
                    Ok(uuid) => coerced.target_entity_id = Some(EntityId(uuid)),
                    Err(_) => notes.push(format!(
                        "systems[{index}]: unparseable target id \"{target}\", dropped"
                    )),
                }
            }
            system.interactions.push(coerced);
        }
    }

    Some(system)
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn coerce_id(map: &Map<String, Value>, notes: &mut Vec<String>) -> Option<Uuid> {
    let raw = map.get("id").and_then(Value::as_str)?;
    match Uuid::parse_str(raw) {
        Ok(uuid) => Some(uuid),
        Err(_) => {
            notes.push(format!("unparseable id \"{raw}\", generating a fresh one"));
            None
        }
    }
}

/// Parse an enum tag, noting the downgrade when the tag is unknown.
fn parse_tag<T: Copy>(
    tag: &str,
    parse: fn(&str) -> T,
    as_tag: fn(&T) -> &'static str,
    notes: &mut Vec<String>,
) -> T {
    let parsed = parse(tag);
    if as_tag(&parsed) != tag {
        notes.push(format!(
            "unknown tag \"{tag}\", using \"{}\"",
            as_tag(&parsed)
        ));
    }
    parsed
}

/// Clamp an integer field into `[0, max]`, noting the downgrade.
fn clamp_int(value: u64, max: u8, field: &str, notes: &mut Vec<String>) -> u8 {
    if value > u64::from(max) {
        notes.push(format!("{field} {value} above {max}, clamping"));
        max
    } else {
        value as u8
    }
}

fn coerce_transform(value: Option<&Value>) -> Transform {
    let Some(map) = value.and_then(Value::as_object) else {
        return Transform::default();
    };
    Transform {
        position: coerce_vector(map.get("position"), Vector3::ZERO),
        rotation: coerce_vector(map.get("rotation"), Vector3::ZERO),
        scale: coerce_vector(map.get("scale"), Vector3::ONE),
    }
}

fn coerce_vector(value: Option<&Value>, default: Vector3) -> Vector3 {
    let Some(map) = value.and_then(Value::as_object) else {
        return default;
    };
    let axis = |key: &str, fallback: f64| map.get(key).and_then(Value::as_f64).unwrap_or(fallback);
    Vector3::new(
        axis("x", default.x),
        axis("y", default.y),
        axis("z", default.z),
    )
}

/// Coerce a color object, clamping out-of-range channels into `[0, 1]`.
fn coerce_color(value: &Value, default: Color, notes: &mut Vec<String>) -> Color {
    let Some(map) = value.as_object() else {
        return default;
    };
    let mut clamped = false;
    let mut channel = |key: &str, fallback: f32| {
        let raw = map.get(key).and_then(Value::as_f64).unwrap_or(f64::from(fallback));
        if (0.0..=1.0).contains(&raw) {
            raw as f32
        } else {
            clamped = true;
            raw.clamp(0.0, 1.0) as f32
        }
    };
    let (r, g, b, a) = (
        channel("r", default.r),
        channel("g", default.g),
        channel("b", default.b),
        channel("a", 1.0),
    );
    if clamped {
        notes.push("color channel outside [0, 1], clamped".to_string());
    }
    // Channels are clamped above, so construction cannot fail.
    Color::new(r, g, b, a).unwrap_or(default)
}

fn string_list(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_input_is_the_only_hard_failure() {
        assert!(world_from_value(&json!([1, 2, 3])).is_err());
        assert!(world_from_value(&json!({})).is_ok());
    }

    #[test]
    fn missing_title_falls_back_with_note() {
        let coerced = world_from_value(&json!({"metadata": {}})).unwrap();
        assert_eq!(coerced.world.meta.title, "Untitled World");
        assert!(coerced.notes.iter().any(|n| n.contains("metadata.title")));
    }

    #[test]
    fn unknown_entity_kind_falls_back_with_note() {
        let coerced = world_from_value(&json!({
            "metadata": {"title": "T"},
            "entities": [{"name": "Blob", "entity_type": "blob"}]
        }))
        .unwrap();
        assert_eq!(coerced.world.entities()[0].kind, EntityKind::StaticMesh);
        assert!(coerced.notes.iter().any(|n| n.contains("blob")));
    }

    #[test]
    fn empty_lights_get_default_sun() {
        let coerced = world_from_value(&json!({"metadata": {"title": "T"}})).unwrap();
        assert_eq!(coerced.world.lights().len(), 1);
        assert_eq!(coerced.world.lights()[0].name, "Sun");
        assert_eq!(coerced.world.lights()[0].kind, LightKind::Directional);
    }

    #[test]
    fn malformed_entity_entries_are_skipped() {
        let coerced = world_from_value(&json!({
            "metadata": {"title": "T"},
            "entities": [42, {"name": "Ok"}]
        }))
        .unwrap();
        assert_eq!(coerced.world.entity_count(), 1);
        assert!(coerced.notes.iter().any(|n| n.contains("entities[0]")));
    }

    #[test]
    fn out_of_range_color_is_clamped() {
        let coerced = world_from_value(&json!({
            "metadata": {"title": "T"},
            "lights": [{"name": "Hot", "color": {"r": 4.0, "g": 0.5, "b": 0.5}}]
        }))
        .unwrap();
        assert_eq!(coerced.world.lights()[0].color.r, 1.0);
        assert!(coerced.notes.iter().any(|n| n.contains("clamped")));
    }

    #[test]
    fn well_formed_input_coerces_clean() {
        let coerced = world_from_value(&json!({
            "metadata": {"title": "Clean", "author": "gen"},
            "environment": {"weather": "rainy", "fog_enabled": true},
            "entities": [{
                "name": "Ground",
                "entity_type": "terrain",
                "transform": {"scale": {"x": 100.0, "y": 1.0, "z": 100.0}},
                "tags": ["terrain"]
            }],
            "lights": [{"name": "Sun", "light_type": "directional", "intensity": 1.2}]
        }))
        .unwrap();
        assert!(coerced.is_clean());
        assert_eq!(coerced.world.environment.weather, Weather::Rainy);
        assert_eq!(coerced.world.entities()[0].transform.scale.x, 100.0);
        assert_eq!(coerced.world.lights()[0].intensity, 1.2);
    }

    #[test]
    fn interaction_targets_parse_or_drop() {
        let id = Uuid::new_v4();
        let coerced = world_from_value(&json!({
            "metadata": {"title": "T"},
            "systems": [{
                "name": "S",
                "interactions": [
                    {"trigger_type": "click", "action_type": "spawn", "target_entity_id": id.to_string()},
                    {"trigger_type": "click", "action_type": "spawn", "target_entity_id": "not-a-uuid"}
                ]
            }]
        }))
        .unwrap();
        let system = &coerced.world.systems()[0];
        assert_eq!(system.interactions[0].target_entity_id, Some(EntityId(id)));
        assert_eq!(system.interactions[1].target_entity_id, None);
        assert!(coerced.notes.iter().any(|n| n.contains("not-a-uuid")));
    }
}
