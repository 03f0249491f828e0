//! Meta Horizon Worlds target: TypeScript modules under `scripts/` with
//! typed interfaces, plus the dump under `data/` both as JSON and as a
//! typed module.

use wdl_core::{Color, EntityKind, LightKind, Vector3, WdlResult, World};

use crate::emit::{float, float32, quoted, quoted_list};
use crate::{GeneratedFiles, Generator};

/// Generates TypeScript scripts and typed data modules.
pub struct HorizonGenerator;

impl Generator for HorizonGenerator {
    fn platform_name(&self) -> &'static str {
        "horizon"
    }

    fn file_extension(&self) -> &'static str {
        ".ts"
    }

    fn generate(&self, world: &World) -> WdlResult<GeneratedFiles> {
        let mut files = GeneratedFiles::new();
        files.insert("scripts/WorldManager.ts".to_string(), world_manager(world));
        files.insert("scripts/EntityFactory.ts".to_string(), entity_factory(world));
        files.insert("scripts/LightingSetup.ts".to_string(), lighting_setup(world));
        files.insert(
            "scripts/EnvironmentController.ts".to_string(),
            environment_controller(world),
        );
        files.insert("scripts/types.ts".to_string(), type_definitions());
        let dump = world.to_json()?;
        files.insert("data/worldData.ts".to_string(), world_data_module(&dump));
        files.insert("data/world_data.json".to_string(), dump);
        Ok(files)
    }
}

fn ts_vec3(v: Vector3) -> String {
    format!(
        "{{ x: {}, y: {}, z: {} }}",
        float(v.x),
        float(v.y),
        float(v.z)
    )
}

fn ts_color(c: Color) -> String {
    format!(
        "{{ r: {}, g: {}, b: {}, a: {} }}",
        float32(c.r),
        float32(c.g),
        float32(c.b),
        float32(c.a)
    )
}

fn world_manager(world: &World) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// World manager for {}.\n",
        quoted(&world.meta.title)
    ));
    out.push_str("import { worldData } from \"../data/worldData\";\n");
    out.push_str("import { EntityFactory } from \"./EntityFactory\";\n");
    out.push_str("import { LightingSetup } from \"./LightingSetup\";\n");
    out.push_str("import { EnvironmentController } from \"./EnvironmentController\";\n\n");
    out.push_str("export class WorldManager {\n");
    out.push_str(&format!(
        "  static readonly title = {};\n",
        quoted(&world.meta.title)
    ));
    out.push_str(&format!(
        "  static readonly version = {};\n",
        quoted(&world.meta.version)
    ));
    out.push_str(&format!(
        "  static readonly entityCount = {};\n\n",
        world.entity_count()
    ));
    out.push_str("  init(): void {\n");
    out.push_str("    console.log(`Loading world: ${worldData.metadata.title}`);\n");
    out.push_str("    new EntityFactory().createAll();\n");
    out.push_str("    new LightingSetup().createAll();\n");
    out.push_str("    new EnvironmentController().apply();\n");
    out.push_str("  }\n}\n");
    out
}

fn entity_factory(world: &World) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// Entity records: {} entities.\n",
        world.entity_count()
    ));
    out.push_str("import { EntityType, Vector3 } from \"./types\";\n\n");
    out.push_str("export interface EntityRecord {\n");
    out.push_str("  id: string;\n");
    out.push_str("  name: string;\n");
    out.push_str("  entityType: EntityType;\n");
    out.push_str("  position: Vector3;\n");
    out.push_str("  rotation: Vector3;\n");
    out.push_str("  scale: Vector3;\n");
    out.push_str("  parentId: string | null;\n");
    out.push_str("  physicsEnabled: boolean;\n");
    out.push_str("  mass: number;\n");
    out.push_str("  tags: string[];\n");
    out.push_str("  assetReference: string | null;\n");
    out.push_str("}\n\n");

    out.push_str("export const ENTITIES: EntityRecord[] = [\n");
    for entity in world.entities() {
        out.push_str("  {\n");
        out.push_str(&format!("    id: {},\n", quoted(&entity.id.to_string())));
        out.push_str(&format!("    name: {},\n", quoted(&entity.name)));
        out.push_str(&format!(
            "    entityType: {},\n",
            quoted(entity.kind.as_tag())
        ));
        out.push_str(&format!(
            "    position: {},\n",
            ts_vec3(entity.transform.position)
        ));
        out.push_str(&format!(
            "    rotation: {},\n",
            ts_vec3(entity.transform.rotation)
        ));
        out.push_str(&format!("    scale: {},\n", ts_vec3(entity.transform.scale)));
        out.push_str(&format!(
            "    parentId: {},\n",
            entity
                .parent_id
                .map(|id| quoted(&id.to_string()))
                .unwrap_or_else(|| "null".to_string())
        ));
        out.push_str(&format!(
            "    physicsEnabled: {},\n",
            entity.physics.enabled
        ));
        out.push_str(&format!("    mass: {},\n", float32(entity.physics.mass)));
        out.push_str(&format!("    tags: {},\n", quoted_list(&entity.tags)));
        out.push_str(&format!(
            "    assetReference: {},\n",
            entity
                .asset_reference
                .as_deref()
                .map(quoted)
                .unwrap_or_else(|| "null".to_string())
        ));
        out.push_str("  },\n");
    }
    out.push_str("];\n\n");

    out.push_str("// Spawn handler per entity type.\n");
    out.push_str(
        "export const SPAWN_HANDLERS: Record<EntityType, (record: EntityRecord) => void> = {\n",
    );
    for kind in EntityKind::ALL {
        out.push_str(&format!(
            "  {}: (record) => console.log(`spawn {} ${{record.name}}`),\n",
            kind.as_tag(),
            kind.as_tag()
        ));
    }
    out.push_str("};\n\n");

    out.push_str("export class EntityFactory {\n");
    out.push_str("  createAll(): EntityRecord[] {\n");
    out.push_str("    for (const record of ENTITIES) {\n");
    out.push_str("      SPAWN_HANDLERS[record.entityType](record);\n");
    out.push_str("    }\n");
    out.push_str("    return ENTITIES;\n");
    out.push_str("  }\n\n");
    out.push_str("  byTag(tag: string): EntityRecord[] {\n");
    out.push_str("    return ENTITIES.filter((record) => record.tags.includes(tag));\n");
    out.push_str("  }\n}\n");
    out
}

fn lighting_setup(world: &World) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// Light records: {} lights.\n",
        world.light_count()
    ));
    out.push_str("import { Color, LightType, Vector3 } from \"./types\";\n\n");
    out.push_str("export interface LightRecord {\n");
    out.push_str("  name: string;\n");
    out.push_str("  lightType: LightType;\n");
    out.push_str("  color: Color;\n");
    out.push_str("  intensity: number;\n");
    out.push_str("  castShadows: boolean;\n");
    out.push_str("  position: Vector3;\n");
    out.push_str("  rotation: Vector3;\n");
    out.push_str("}\n\n");

    out.push_str("export const LIGHTS: LightRecord[] = [\n");
    for light in world.lights() {
        out.push_str("  {\n");
        out.push_str(&format!("    name: {},\n", quoted(&light.name)));
        out.push_str(&format!(
            "    lightType: {},\n",
            quoted(light.kind.as_tag())
        ));
        out.push_str(&format!("    color: {},\n", ts_color(light.color)));
        out.push_str(&format!(
            "    intensity: {},\n",
            float32(light.intensity)
        ));
        out.push_str(&format!("    castShadows: {},\n", light.cast_shadows));
        out.push_str(&format!(
            "    position: {},\n",
            ts_vec3(light.transform.position)
        ));
        out.push_str(&format!(
            "    rotation: {},\n",
            ts_vec3(light.transform.rotation)
        ));
        out.push_str("  },\n");
    }
    out.push_str("];\n\n");

    out.push_str("// Setup handler per light type.\n");
    out.push_str(
        "export const LIGHT_HANDLERS: Record<LightType, (record: LightRecord) => void> = {\n",
    );
    for kind in LightKind::ALL {
        out.push_str(&format!(
            "  {}: (record) => console.log(`light {} ${{record.name}}`),\n",
            kind.as_tag(),
            kind.as_tag()
        ));
    }
    out.push_str("};\n\n");

    out.push_str("export class LightingSetup {\n");
    out.push_str("  createAll(): LightRecord[] {\n");
    out.push_str("    for (const record of LIGHTS) {\n");
    out.push_str("      LIGHT_HANDLERS[record.lightType](record);\n");
    out.push_str("    }\n");
    out.push_str("    return LIGHTS;\n");
    out.push_str("  }\n}\n");
    out
}

fn environment_controller(world: &World) -> String {
    let env = &world.environment;
    let mut out = String::new();
    out.push_str("// Environment configuration.\n");
    out.push_str("import { EnvironmentConfig } from \"./types\";\n\n");
    out.push_str("export const ENVIRONMENT: EnvironmentConfig = {\n");
    out.push_str(&format!("  weather: {},\n", quoted(env.weather.as_tag())));
    out.push_str("  timeOfDay: {\n");
    out.push_str(&format!("    hour: {},\n", env.time_of_day.hour));
    out.push_str(&format!("    minute: {},\n", env.time_of_day.minute));
    out.push_str(&format!(
        "    dayNightCycle: {},\n",
        env.time_of_day.day_night_cycle
    ));
    out.push_str(&format!(
        "    cycleDurationSeconds: {},\n",
        float(env.time_of_day.cycle_duration_seconds)
    ));
    out.push_str("  },\n");
    out.push_str(&format!(
        "  ambientLight: {},\n",
        ts_color(env.ambient_light)
    ));
    out.push_str(&format!("  fogEnabled: {},\n", env.fog_enabled));
    out.push_str(&format!("  fogColor: {},\n", ts_color(env.fog_color)));
    out.push_str(&format!(
        "  fogDensity: {},\n",
        float32(env.fog_density)
    ));
    out.push_str(&format!(
        "  skyboxType: {},\n",
        quoted(&env.skybox.skybox_type)
    ));
    out.push_str(&format!(
        "  skyboxExposure: {},\n",
        float32(env.skybox.exposure)
    ));
    out.push_str(&format!("  gravity: {},\n", ts_vec3(env.gravity)));
    out.push_str(&format!(
        "  audioReverbPreset: {},\n",
        env.audio_reverb_preset
            .as_deref()
            .map(quoted)
            .unwrap_or_else(|| "null".to_string())
    ));
    out.push_str("};\n\n");

    out.push_str("export class EnvironmentController {\n");
    out.push_str("  apply(): void {\n");
    out.push_str(
        "    console.log(`Environment: ${ENVIRONMENT.weather}, fog=${ENVIRONMENT.fogEnabled}`);\n",
    );
    out.push_str("  }\n}\n");
    out
}

/// Union types for every enum plus interfaces for the value shapes and
/// the canonical dump.
fn type_definitions() -> String {
    let mut out = String::new();
    out.push_str("// Type definitions for the world data dump.\n\n");

    let unions: [(&str, Vec<&'static str>); 7] = [
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
    for (name, tags) in unions {
        let parts: Vec<String> = tags.iter().map(|t| quoted(t)).collect();
        out.push_str(&format!(
            "export type {name} =\n  | {};\n\n",
            parts.join("\n  | ")
        ));
    }

    out.push_str("export interface Vector3 {\n  x: number;\n  y: number;\n  z: number;\n}\n\n");
    out.push_str(
        "export interface Color {\n  r: number;\n  g: number;\n  b: number;\n  a: number;\n}\n\n",
    );
    out.push_str("export interface Transform {\n  position: Vector3;\n  rotation: Vector3;\n  scale: Vector3;\n}\n\n");
    out.push_str("export interface Material {\n  name: string;\n  material_type: MaterialType;\n  base_color: Color;\n  metallic: number;\n  roughness: number;\n  emission_color?: Color;\n  emission_strength: number;\n  texture_path?: string;\n  normal_map_path?: string;\n}\n\n");
    out.push_str("export interface PhysicsSettings {\n  enabled: boolean;\n  is_kinematic: boolean;\n  mass: number;\n  drag: number;\n  angular_drag: number;\n  use_gravity: boolean;\n  collision_enabled: boolean;\n}\n\n");
    out.push_str("export interface Collider {\n  collider_type: ColliderType;\n  is_trigger: boolean;\n  center: Vector3;\n  size: Vector3;\n  radius?: number;\n  height?: number;\n}\n\n");
    out.push_str("export interface Entity {\n  id: string;\n  name: string;\n  entity_type: EntityType;\n  transform: Transform;\n  material?: Material;\n  physics: PhysicsSettings;\n  collider?: Collider;\n  parent_id?: string;\n  children_ids: string[];\n  tags: string[];\n  metadata: Record<string, unknown>;\n  asset_reference?: string;\n  prefab_reference?: string;\n}\n\n");
    out.push_str("export interface Light {\n  name: string;\n  light_type: LightType;\n  color: Color;\n  intensity: number;\n  range?: number;\n  spot_angle?: number;\n  cast_shadows: boolean;\n  transform: Transform;\n}\n\n");
    out.push_str("export interface Interaction {\n  trigger_type: TriggerType;\n  action_type: ActionType;\n  target_entity_id?: string;\n  parameters: Record<string, unknown>;\n}\n\n");
    out.push_str("export interface System {\n  id: string;\n  name: string;\n  description: string;\n  interactions: Interaction[];\n  enabled: boolean;\n  priority: number;\n  conditions: Record<string, unknown>;\n}\n\n");
    out.push_str("export interface TimeOfDay {\n  hour: number;\n  minute: number;\n  day_night_cycle: boolean;\n  cycle_duration_seconds: number;\n}\n\n");
    out.push_str("export interface Skybox {\n  skybox_type: string;\n  texture_path?: string;\n  tint_color: Color;\n  exposure: number;\n  rotation: number;\n}\n\n");
    out.push_str("export interface Environment {\n  weather: WeatherType;\n  time_of_day: TimeOfDay;\n  ambient_light: Color;\n  fog_enabled: boolean;\n  fog_color: Color;\n  fog_density: number;\n  skybox: Skybox;\n  gravity: Vector3;\n  audio_reverb_preset?: string;\n}\n\n");
    out.push_str("export interface WorldBounds {\n  min_bounds: Vector3;\n  max_bounds: Vector3;\n}\n\n");
    out.push_str("export interface WorldMetadata {\n  title: string;\n  description: string;\n  author: string;\n  version: string;\n  created_at: string;\n  updated_at: string;\n  tags: string[];\n  target_platforms: string[];\n}\n\n");
    out.push_str("export interface WorldData {\n  metadata: WorldMetadata;\n  environment: Environment;\n  entities: Entity[];\n  lights: Light[];\n  systems: System[];\n  bounds: WorldBounds;\n}\n\n");
    out.push_str("// Camel-cased runtime view used by EnvironmentController.\n");
    out.push_str("export interface EnvironmentConfig {\n  weather: WeatherType;\n  timeOfDay: {\n    hour: number;\n    minute: number;\n    dayNightCycle: boolean;\n    cycleDurationSeconds: number;\n  };\n  ambientLight: Color;\n  fogEnabled: boolean;\n  fogColor: Color;\n  fogDensity: number;\n  skyboxType: string;\n  skyboxExposure: number;\n  gravity: Vector3;\n  audioReverbPreset: string | null;\n}\n");
    out
}

/// The canonical dump as a typed module, so scripts can import it
/// without a JSON loader.
fn world_data_module(dump: &str) -> String {
    let mut out = String::new();
    out.push_str("// Typed world data module. Mirrors world_data.json.\n");
    out.push_str("import { WorldData } from \"../scripts/types\";\n\n");
    out.push_str("export const worldData: WorldData = ");
    out.push_str(dump);
    out.push_str(";\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdl_core::sample::demo_world;

    #[test]
    fn generates_expected_file_set() {
        let files = HorizonGenerator.generate(&demo_world()).unwrap();
        for path in [
            "scripts/WorldManager.ts",
            "scripts/EntityFactory.ts",
            "scripts/LightingSetup.ts",
            "scripts/EnvironmentController.ts",
            "scripts/types.ts",
            "data/worldData.ts",
            "data/world_data.json",
        ] {
            assert!(files.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn manager_names_the_world() {
        let files = HorizonGenerator.generate(&demo_world()).unwrap();
        let manager = &files["scripts/WorldManager.ts"];
        assert!(manager.contains("Forest Clearing"));
        assert!(manager.contains("class WorldManager"));
        assert!(manager.contains("import"));
    }

    #[test]
    fn factory_lists_entities_and_handlers_per_type() {
        let world = demo_world();
        let files = HorizonGenerator.generate(&world).unwrap();
        let factory = &files["scripts/EntityFactory.ts"];
        for entity in world.entities() {
            assert!(factory.contains(&entity.name));
        }
        assert!(factory.contains("class EntityFactory"));
        for kind in EntityKind::ALL {
            assert!(factory.contains(&format!("  {}: (record)", kind.as_tag())));
        }
    }

    #[test]
    fn types_module_covers_enums_and_interfaces() {
        let files = HorizonGenerator.generate(&demo_world()).unwrap();
        let types = &files["scripts/types.ts"];
        assert!(types.contains("export type EntityType"));
        assert!(types.contains("| \"static_mesh\""));
        assert!(types.contains("export interface Vector3"));
        assert!(types.contains("export interface Color"));
        assert!(types.contains("export type LightType"));
        assert!(types.contains("export interface WorldData"));
    }

    #[test]
    fn world_data_module_embeds_the_dump() {
        let world = demo_world();
        let files = HorizonGenerator.generate(&world).unwrap();
        let module = &files["data/worldData.ts"];
        assert!(module.starts_with("// Typed world data module."));
        assert!(module.contains("export const worldData: WorldData ="));
        assert!(module.contains(&world.meta.title));
    }

    #[test]
    fn lighting_covers_all_light_types() {
        let files = HorizonGenerator.generate(&demo_world()).unwrap();
        let lighting = &files["scripts/LightingSetup.ts"];
        assert!(lighting.contains("\"Sun\""));
        for kind in LightKind::ALL {
            assert!(lighting.contains(&format!("  {}: (record)", kind.as_tag())));
        }
    }
}
