//! Unreal Engine target: editor Python scripts under `Scripts/` built
//! around declarative data tables, plus the canonical dump under `Data/`.

use wdl_core::{EntityKind, LightKind, WdlResult, World};

use crate::emit::{color_tuple, float, float32, quoted, quoted_list, vec3_tuple};
use crate::{GeneratedFiles, Generator};

/// Generates `unreal`-module Python scripts: data tables plus spawn
/// functions driven by them.
pub struct UnrealGenerator;

impl Generator for UnrealGenerator {
    fn platform_name(&self) -> &'static str {
        "unreal"
    }

    fn file_extension(&self) -> &'static str {
        ".py"
    }

    fn generate(&self, world: &World) -> WdlResult<GeneratedFiles> {
        let mut files = GeneratedFiles::new();
        files.insert("Scripts/world_builder.py".to_string(), world_builder(world));
        files.insert(
            "Scripts/entity_definitions.py".to_string(),
            entity_definitions(world),
        );
        files.insert("Scripts/lighting_setup.py".to_string(), lighting_setup(world));
        files.insert(
            "Scripts/environment_setup.py".to_string(),
            environment_setup(world),
        );
        files.insert("Scripts/wdl_types.py".to_string(), wdl_types());
        files.insert("Data/world_data.json".to_string(), world.to_json()?);
        Ok(files)
    }
}

fn py_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

fn py_opt_str(value: Option<&str>) -> String {
    match value {
        Some(s) => quoted(s),
        None => "None".to_string(),
    }
}

/// Unreal actor class standing in for each entity kind.
fn actor_class_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::StaticMesh => "unreal.StaticMeshActor",
        EntityKind::Character => "unreal.Character",
        EntityKind::Trigger => "unreal.TriggerBox",
        EntityKind::SpawnPoint => "unreal.PlayerStart",
        EntityKind::Light => "unreal.PointLight",
        EntityKind::Camera => "unreal.CameraActor",
        EntityKind::AudioSource => "unreal.AmbientSound",
        EntityKind::Terrain => "unreal.Landscape",
        _ => "unreal.Actor",
    }
}

/// Unreal light class for each light kind.
fn light_class_for(kind: LightKind) -> &'static str {
    match kind {
        LightKind::Directional => "unreal.DirectionalLight",
        LightKind::Spot => "unreal.SpotLight",
        LightKind::Area => "unreal.RectLight",
        LightKind::Point | LightKind::Ambient => "unreal.PointLight",
    }
}

fn world_builder(world: &World) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\"\"\"World builder for {}.\"\"\"\n\n",
        quoted(&world.meta.title)
    ));
    out.push_str("import unreal\n\n");
    out.push_str("from entity_definitions import spawn_entities\n");
    out.push_str("from lighting_setup import spawn_lights\n");
    out.push_str("from environment_setup import setup_environment\n\n\n");
    out.push_str("class WorldBuilder:\n");
    out.push_str("    \"\"\"Spawns the generated world into the open level.\"\"\"\n\n");
    out.push_str(&format!(
        "    title = {}\n",
        quoted(&world.meta.title)
    ));
    out.push_str(&format!(
        "    version = {}\n",
        quoted(&world.meta.version)
    ));
    out.push_str(&format!(
        "    author = {}\n\n",
        quoted(&world.meta.author)
    ));
    out.push_str("    def build(self):\n");
    out.push_str("        unreal.log(f\"Building world: {self.title} v{self.version}\")\n");
    out.push_str("        actors = spawn_entities()\n");
    out.push_str("        lights = spawn_lights()\n");
    out.push_str("        setup_environment()\n");
    out.push_str(
        "        unreal.log(f\"Spawned {len(actors)} entities and {len(lights)} lights\")\n\n\n",
    );
    out.push_str("if __name__ == \"__main__\":\n");
    out.push_str("    WorldBuilder().build()\n");
    out
}

fn entity_definitions(world: &World) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\"\"\"Entity data table: {} entities.\"\"\"\n\n",
        world.entity_count()
    ));
    out.push_str("from dataclasses import dataclass, field\nfrom typing import List, Optional\n\n");
    out.push_str("import unreal\n\n\n");
    out.push_str("@dataclass\nclass EntityData:\n");
    out.push_str("    id: str\n");
    out.push_str("    name: str\n");
    out.push_str("    entity_type: str\n");
    out.push_str("    position: tuple\n");
    out.push_str("    rotation: tuple\n");
    out.push_str("    scale: tuple\n");
    out.push_str("    physics_enabled: bool = False\n");
    out.push_str("    mass: float = 1.0\n");
    out.push_str("    parent_id: Optional[str] = None\n");
    out.push_str("    tags: List[str] = field(default_factory=list)\n");
    out.push_str("    asset_reference: Optional[str] = None\n\n\n");

    out.push_str("ENTITY_DATA: List[EntityData] = [\n");
    for entity in world.entities() {
        out.push_str("    EntityData(\n");
        out.push_str(&format!("        id={},\n", quoted(&entity.id.to_string())));
        out.push_str(&format!("        name={},\n", quoted(&entity.name)));
        out.push_str(&format!(
            "        entity_type={},\n",
            quoted(entity.kind.as_tag())
        ));
        out.push_str(&format!(
            "        position={},\n",
            vec3_tuple(entity.transform.position)
        ));
        out.push_str(&format!(
            "        rotation={},\n",
            vec3_tuple(entity.transform.rotation)
        ));
        out.push_str(&format!(
            "        scale={},\n",
            vec3_tuple(entity.transform.scale)
        ));
        out.push_str(&format!(
            "        physics_enabled={},\n",
            py_bool(entity.physics.enabled)
        ));
        out.push_str(&format!("        mass={},\n", float32(entity.physics.mass)));
        out.push_str(&format!(
            "        parent_id={},\n",
            py_opt_str(entity.parent_id.map(|id| id.to_string()).as_deref())
        ));
        out.push_str(&format!("        tags={},\n", quoted_list(&entity.tags)));
        out.push_str(&format!(
            "        asset_reference={},\n",
            py_opt_str(entity.asset_reference.as_deref())
        ));
        out.push_str("    ),\n");
    }
    out.push_str("]\n\n\n");

    out.push_str("ACTOR_CLASSES = {\n");
    for kind in EntityKind::ALL {
        out.push_str(&format!(
            "    {}: {},\n",
            quoted(kind.as_tag()),
            actor_class_for(kind)
        ));
    }
    out.push_str("}\n\n\n");

    out.push_str("def get_actor_class(entity_type: str):\n");
    out.push_str("    \"\"\"Actor class for an entity type tag.\"\"\"\n");
    out.push_str("    return ACTOR_CLASSES.get(entity_type, unreal.Actor)\n\n\n");

    out.push_str("def spawn_entity(data: EntityData):\n");
    out.push_str("    location = unreal.Vector(*data.position)\n");
    out.push_str("    rotation = unreal.Rotator(*data.rotation)\n");
    out.push_str("    actor = unreal.EditorLevelLibrary.spawn_actor_from_class(\n");
    out.push_str("        get_actor_class(data.entity_type), location, rotation\n");
    out.push_str("    )\n");
    out.push_str("    if actor:\n");
    out.push_str("        actor.set_actor_label(data.name)\n");
    out.push_str("        actor.set_actor_scale3d(unreal.Vector(*data.scale))\n");
    out.push_str("        for tag in data.tags:\n");
    out.push_str("            actor.tags.append(tag)\n");
    out.push_str("    return actor\n\n\n");

    out.push_str("def spawn_entities():\n");
    out.push_str("    \"\"\"Spawn every entity in ENTITY_DATA, in table order.\"\"\"\n");
    out.push_str("    spawned = []\n");
    out.push_str("    for data in ENTITY_DATA:\n");
    out.push_str("        actor = spawn_entity(data)\n");
    out.push_str("        if actor:\n");
    out.push_str("            spawned.append(actor)\n");
    out.push_str("            unreal.log(f\"Spawned: {data.name}\")\n");
    out.push_str("        else:\n");
    out.push_str("            unreal.log_warning(f\"Failed to spawn: {data.name}\")\n");
    out.push_str("    return spawned\n");
    out
}

fn lighting_setup(world: &World) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\"\"\"Lighting data table: {} lights.\"\"\"\n\n",
        world.light_count()
    ));
    out.push_str("from dataclasses import dataclass\nfrom typing import List, Optional\n\n");
    out.push_str("import unreal\n\n\n");
    out.push_str("@dataclass\nclass LightData:\n");
    out.push_str("    name: str\n");
    out.push_str("    light_type: str\n");
    out.push_str("    color: tuple\n");
    out.push_str("    intensity: float\n");
    out.push_str("    position: tuple\n");
    out.push_str("    rotation: tuple\n");
    out.push_str("    cast_shadows: bool = True\n");
    out.push_str("    range: Optional[float] = None\n");
    out.push_str("    spot_angle: Optional[float] = None\n\n\n");

    out.push_str("LIGHT_DATA: List[LightData] = [\n");
    for light in world.lights() {
        out.push_str("    LightData(\n");
        out.push_str(&format!("        name={},\n", quoted(&light.name)));
        out.push_str(&format!(
            "        light_type={},\n",
            quoted(light.kind.as_tag())
        ));
        out.push_str(&format!("        color={},\n", color_tuple(light.color)));
        out.push_str(&format!(
            "        intensity={},\n",
            float32(light.intensity)
        ));
        out.push_str(&format!(
            "        position={},\n",
            vec3_tuple(light.transform.position)
        ));
        out.push_str(&format!(
            "        rotation={},\n",
            vec3_tuple(light.transform.rotation)
        ));
        out.push_str(&format!(
            "        cast_shadows={},\n",
            py_bool(light.cast_shadows)
        ));
        if let Some(range) = light.range {
            out.push_str(&format!("        range={},\n", float(range)));
        }
        if let Some(angle) = light.spot_angle {
            out.push_str(&format!("        spot_angle={},\n", float(angle)));
        }
        out.push_str("    ),\n");
    }
    out.push_str("]\n\n\n");

    out.push_str("LIGHT_CLASSES = {\n");
    for kind in LightKind::ALL {
        out.push_str(&format!(
            "    {}: {},\n",
            quoted(kind.as_tag()),
            light_class_for(kind)
        ));
    }
    out.push_str("}\n\n\n");

    out.push_str("def get_light_class(light_type: str):\n");
    out.push_str("    \"\"\"Light class for a light type tag.\"\"\"\n");
    out.push_str("    return LIGHT_CLASSES.get(light_type, unreal.PointLight)\n\n\n");

    out.push_str("def spawn_light(data: LightData):\n");
    out.push_str("    location = unreal.Vector(*data.position)\n");
    out.push_str("    rotation = unreal.Rotator(*data.rotation)\n");
    out.push_str("    actor = unreal.EditorLevelLibrary.spawn_actor_from_class(\n");
    out.push_str("        get_light_class(data.light_type), location, rotation\n");
    out.push_str("    )\n");
    out.push_str("    if actor:\n");
    out.push_str("        actor.set_actor_label(data.name)\n");
    out.push_str("        component = actor.get_component_by_class(unreal.LightComponent)\n");
    out.push_str("        if component:\n");
    out.push_str("            component.set_intensity(data.intensity)\n");
    out.push_str("            component.set_light_color(unreal.LinearColor(*data.color))\n");
    out.push_str("            component.set_cast_shadows(data.cast_shadows)\n");
    out.push_str("    return actor\n\n\n");

    out.push_str("def spawn_lights():\n");
    out.push_str("    \"\"\"Spawn every light in LIGHT_DATA, in table order.\"\"\"\n");
    out.push_str("    spawned = []\n");
    out.push_str("    for data in LIGHT_DATA:\n");
    out.push_str("        actor = spawn_light(data)\n");
    out.push_str("        if actor:\n");
    out.push_str("            spawned.append(actor)\n");
    out.push_str("    return spawned\n");
    out
}

fn environment_setup(world: &World) -> String {
    let env = &world.environment;
    let mut out = String::new();
    out.push_str("\"\"\"Environment configuration table.\"\"\"\n\n");
    out.push_str("import unreal\n\n\n");
    out.push_str("ENVIRONMENT_CONFIG = {\n");
    out.push_str(&format!(
        "    \"weather\": {},\n",
        quoted(env.weather.as_tag())
    ));
    out.push_str(&format!("    \"time_hour\": {},\n", env.time_of_day.hour));
    out.push_str(&format!(
        "    \"time_minute\": {},\n",
        env.time_of_day.minute
    ));
    out.push_str(&format!(
        "    \"day_night_cycle\": {},\n",
        py_bool(env.time_of_day.day_night_cycle)
    ));
    out.push_str(&format!(
        "    \"cycle_duration_seconds\": {},\n",
        float(env.time_of_day.cycle_duration_seconds)
    ));
    out.push_str(&format!(
        "    \"ambient_light\": {},\n",
        color_tuple(env.ambient_light)
    ));
    out.push_str(&format!(
        "    \"fog_enabled\": {},\n",
        py_bool(env.fog_enabled)
    ));
    out.push_str(&format!(
        "    \"fog_color\": {},\n",
        color_tuple(env.fog_color)
    ));
    out.push_str(&format!(
        "    \"fog_density\": {},\n",
        float32(env.fog_density)
    ));
    out.push_str(&format!(
        "    \"skybox_type\": {},\n",
        quoted(&env.skybox.skybox_type)
    ));
    out.push_str(&format!(
        "    \"skybox_exposure\": {},\n",
        float32(env.skybox.exposure)
    ));
    out.push_str(&format!(
        "    \"skybox_rotation\": {},\n",
        float(env.skybox.rotation)
    ));
    out.push_str(&format!("    \"gravity\": {},\n", vec3_tuple(env.gravity)));
    out.push_str(&format!(
        "    \"audio_reverb_preset\": {},\n",
        py_opt_str(env.audio_reverb_preset.as_deref())
    ));
    out.push_str("}\n\n\n");

    out.push_str("def setup_environment():\n");
    out.push_str("    \"\"\"Apply the environment configuration to the open level.\"\"\"\n");
    out.push_str("    unreal.log(\"Setting up environment...\")\n");
    out.push_str("    if ENVIRONMENT_CONFIG[\"fog_enabled\"]:\n");
    out.push_str("        setup_fog()\n");
    out.push_str("    unreal.log(\"Environment setup complete\")\n\n\n");

    out.push_str("def setup_fog():\n");
    out.push_str("    fog_actor = unreal.EditorLevelLibrary.spawn_actor_from_class(\n");
    out.push_str("        unreal.ExponentialHeightFog, unreal.Vector(0, 0, 0)\n");
    out.push_str("    )\n");
    out.push_str("    if not fog_actor:\n");
    out.push_str("        return\n");
    out.push_str(
        "    component = fog_actor.get_component_by_class(unreal.ExponentialHeightFogComponent)\n",
    );
    out.push_str("    if component:\n");
    out.push_str(
        "        component.set_fog_inscattering_color(unreal.LinearColor(*ENVIRONMENT_CONFIG[\"fog_color\"]))\n",
    );
    out.push_str("        component.set_fog_density(ENVIRONMENT_CONFIG[\"fog_density\"])\n");
    out
}

/// Enum and value-shape definitions for static consumption by editor
/// tooling.
fn wdl_types() -> String {
    let mut out = String::new();
    out.push_str("\"\"\"Enum tags and value shapes for the world data dump.\"\"\"\n\n");
    out.push_str("from dataclasses import dataclass\nfrom enum import Enum\n\n\n");

    let enums: [(&str, Vec<&'static str>); 7] = [
        ("EntityType", EntityKind::ALL.iter().map(|k| k.as_tag()).collect()),
        ("LightType", LightKind::ALL.iter().map(|k| k.as_tag()).collect()),
        (
            "MaterialType",
            vec!["standard", "pbr", "unlit", "transparent", "emissive"],
        ),
        (
            "ColliderType",
            vec!["box", "sphere", "capsule", "mesh", "convex"],
        ),
        (
            "WeatherType",
            wdl_core::Weather::ALL.iter().map(|w| w.as_tag()).collect(),
        ),
        (
            "TriggerType",
            wdl_core::TriggerKind::ALL.iter().map(|t| t.as_tag()).collect(),
        ),
        (
            "ActionType",
            wdl_core::ActionKind::ALL.iter().map(|a| a.as_tag()).collect(),
        ),
    ];
    for (name, tags) in enums {
        out.push_str(&format!("class {name}(str, Enum):\n"));
        for tag in tags {
            out.push_str(&format!(
                "    {} = {}\n",
                tag.to_uppercase(),
                quoted(tag)
            ));
        }
        out.push_str("\n\n");
    }

    out.push_str("@dataclass\nclass Vector3:\n    x: float\n    y: float\n    z: float\n\n\n");
    out.push_str(
        "@dataclass\nclass Color:\n    r: float\n    g: float\n    b: float\n    a: float\n\n\n",
    );
    out.push_str(
        "@dataclass\nclass Transform:\n    position: Vector3\n    rotation: Vector3\n    scale: Vector3\n",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdl_core::sample::demo_world;

    #[test]
    fn generates_expected_file_set() {
        let files = UnrealGenerator.generate(&demo_world()).unwrap();
        for path in [
            "Scripts/world_builder.py",
            "Scripts/entity_definitions.py",
            "Scripts/lighting_setup.py",
            "Scripts/environment_setup.py",
            "Scripts/wdl_types.py",
            "Data/world_data.json",
        ] {
            assert!(files.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn builder_names_the_world() {
        let files = UnrealGenerator.generate(&demo_world()).unwrap();
        let builder = &files["Scripts/world_builder.py"];
        assert!(builder.contains("Forest Clearing"));
        assert!(builder.contains("class WorldBuilder"));
        assert!(builder.contains("import unreal"));
    }

    #[test]
    fn entity_table_lists_every_entity_and_class_map() {
        let world = demo_world();
        let files = UnrealGenerator.generate(&world).unwrap();
        let table = &files["Scripts/entity_definitions.py"];
        for entity in world.entities() {
            assert!(table.contains(&entity.name));
        }
        assert!(table.contains("class EntityData"));
        assert!(table.contains("\"terrain\": unreal.Landscape,"));
    }

    #[test]
    fn light_table_keys_by_type() {
        let files = UnrealGenerator.generate(&demo_world()).unwrap();
        let table = &files["Scripts/lighting_setup.py"];
        assert!(table.contains("\"directional\": unreal.DirectionalLight,"));
        assert!(table.contains("name=\"Sun\""));
    }

    #[test]
    fn environment_config_has_every_field() {
        let files = UnrealGenerator.generate(&demo_world()).unwrap();
        let config = &files["Scripts/environment_setup.py"];
        for key in [
            "\"weather\"",
            "\"time_hour\"",
            "\"fog_density\"",
            "\"gravity\"",
            "\"skybox_type\"",
            "\"audio_reverb_preset\"",
        ] {
            assert!(config.contains(key), "missing {key}");
        }
        assert!(config.contains("\"weather\": \"foggy\""));
    }

    #[test]
    fn types_module_defines_enums() {
        let files = UnrealGenerator.generate(&demo_world()).unwrap();
        let types = &files["Scripts/wdl_types.py"];
        assert!(types.contains("class EntityType(str, Enum):"));
        assert!(types.contains("STATIC_MESH = \"static_mesh\""));
        assert!(types.contains("class WeatherType(str, Enum):"));
    }
}
