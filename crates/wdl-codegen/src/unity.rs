//! Unity target: C# scripting classes under `Scripts/` plus the
//! canonical data dump under `Data/`.

use wdl_core::{Color, EntityKind, LightKind, Vector3, WdlResult, World};

use crate::emit::{float32, pascal_case, quoted};
use crate::{GeneratedFiles, Generator};

/// Generates MonoBehaviour-style loader and setup classes in the
/// `Wdl.Generated` namespace.
pub struct UnityGenerator;

impl Generator for UnityGenerator {
    fn platform_name(&self) -> &'static str {
        "unity"
    }

    fn file_extension(&self) -> &'static str {
        ".cs"
    }

    fn generate(&self, world: &World) -> WdlResult<GeneratedFiles> {
        let mut files = GeneratedFiles::new();
        files.insert("Scripts/WorldLoader.cs".to_string(), world_loader(world));
        files.insert("Scripts/EntitySpawner.cs".to_string(), entity_spawner(world));
        files.insert("Scripts/LightingSetup.cs".to_string(), lighting_setup(world));
        files.insert(
            "Scripts/EnvironmentController.cs".to_string(),
            environment_controller(world),
        );
        files.insert("Scripts/WorldData.cs".to_string(), world_data_types());
        files.insert("Data/world_data.json".to_string(), world.to_json()?);
        Ok(files)
    }
}

/// `new Vector3(x, y, z)` with float suffixes.
fn cs_vec3(v: Vector3) -> String {
    format!("new Vector3({}f, {}f, {}f)", v.x, v.y, v.z)
}

/// `new Color(r, g, b, a)` with float suffixes.
fn cs_color(c: Color) -> String {
    format!(
        "new Color({}f, {}f, {}f, {}f)",
        float32(c.r),
        float32(c.g),
        float32(c.b),
        float32(c.a)
    )
}

fn cs_bool(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Unity primitive used to stand in for each entity kind.
fn primitive_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Character => "PrimitiveType.Capsule",
        EntityKind::Terrain => "PrimitiveType.Plane",
        EntityKind::SpawnPoint | EntityKind::Waypoint => "PrimitiveType.Sphere",
        _ => "PrimitiveType.Cube",
    }
}

/// Unity light type for each light kind. Ambient light has no scene
/// object; it contributes through `RenderSettings` instead.
fn light_type_for(kind: LightKind) -> &'static str {
    match kind {
        LightKind::Directional => "LightType.Directional",
        LightKind::Spot => "LightType.Spot",
        LightKind::Area => "LightType.Area",
        LightKind::Point | LightKind::Ambient => "LightType.Point",
    }
}

fn world_loader(world: &World) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// World loader for {}.\n",
        quoted(&world.meta.title)
    ));
    out.push_str("using System.IO;\nusing UnityEngine;\n\n");
    out.push_str("namespace Wdl.Generated\n{\n");
    out.push_str("    /// Loads the serialized world dump and runs scene setup.\n");
    out.push_str("    public class WorldLoader : MonoBehaviour\n    {\n");
    out.push_str(&format!(
        "        public const string WorldTitle = {};\n",
        quoted(&world.meta.title)
    ));
    out.push_str(&format!(
        "        public const string WorldVersion = {};\n",
        quoted(&world.meta.version)
    ));
    out.push_str(&format!(
        "        public const string WorldAuthor = {};\n",
        quoted(&world.meta.author)
    ));
    out.push_str(&format!(
        "        public const int EntityCount = {};\n\n",
        world.entity_count()
    ));
    out.push_str("        void Start()\n        {\n");
    out.push_str(
        "            var path = Path.Combine(Application.dataPath, \"Data/world_data.json\");\n",
    );
    out.push_str("            var world = JsonUtility.FromJson<WorldData>(File.ReadAllText(path));\n");
    out.push_str("            Debug.Log($\"Loading world: {world.metadata.title}\");\n\n");
    out.push_str("            EntitySpawner.SpawnAll();\n");
    out.push_str("            LightingSetup.CreateLights();\n");
    out.push_str("            EnvironmentController.Apply();\n");
    out.push_str("        }\n    }\n}\n");
    out
}

fn entity_spawner(world: &World) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// Entity spawn table: {} entities.\n",
        world.entity_count()
    ));
    out.push_str("using System.Collections.Generic;\nusing UnityEngine;\n\n");
    out.push_str("namespace Wdl.Generated\n{\n");
    out.push_str("    public static class EntitySpawner\n    {\n");
    out.push_str("        public struct EntityRecord\n        {\n");
    out.push_str("            public string Id;\n");
    out.push_str("            public string Name;\n");
    out.push_str("            public string Type;\n");
    out.push_str("            public Vector3 Position;\n");
    out.push_str("            public Vector3 Rotation;\n");
    out.push_str("            public Vector3 Scale;\n");
    out.push_str("            public string ParentId;\n");
    out.push_str("            public string MaterialName;\n");
    out.push_str("            public bool PhysicsEnabled;\n");
    out.push_str("            public float Mass;\n");
    out.push_str("            public string[] Tags;\n");
    out.push_str("            public string AssetReference;\n");
    out.push_str("        }\n\n");

    out.push_str("        public static readonly EntityRecord[] Entities =\n        {\n");
    for entity in world.entities() {
        let tags: Vec<String> = entity.tags.iter().map(|t| quoted(t)).collect();
        out.push_str("            new EntityRecord\n            {\n");
        out.push_str(&format!(
            "                Id = {},\n",
            quoted(&entity.id.to_string())
        ));
        out.push_str(&format!("                Name = {},\n", quoted(&entity.name)));
        out.push_str(&format!(
            "                Type = {},\n",
            quoted(entity.kind.as_tag())
        ));
        out.push_str(&format!(
            "                Position = {},\n",
            cs_vec3(entity.transform.position)
        ));
        out.push_str(&format!(
            "                Rotation = {},\n",
            cs_vec3(entity.transform.rotation)
        ));
        out.push_str(&format!(
            "                Scale = {},\n",
            cs_vec3(entity.transform.scale)
        ));
        out.push_str(&format!(
            "                ParentId = {},\n",
            quoted(
                &entity
                    .parent_id
                    .map(|id| id.to_string())
                    .unwrap_or_default()
            )
        ));
        out.push_str(&format!(
            "                MaterialName = {},\n",
            quoted(
                entity
                    .material
                    .as_ref()
                    .map(|m| m.name.as_str())
                    .unwrap_or("")
            )
        ));
        out.push_str(&format!(
            "                PhysicsEnabled = {},\n",
            cs_bool(entity.physics.enabled)
        ));
        out.push_str(&format!(
            "                Mass = {}f,\n",
            float32(entity.physics.mass)
        ));
        out.push_str(&format!(
            "                Tags = new string[] {{ {} }},\n",
            tags.join(", ")
        ));
        out.push_str(&format!(
            "                AssetReference = {},\n",
            quoted(entity.asset_reference.as_deref().unwrap_or(""))
        ));
        out.push_str("            },\n");
    }
    out.push_str("        };\n\n");

    out.push_str("        static PrimitiveType PrimitiveFor(string entityType)\n        {\n");
    out.push_str("            switch (entityType)\n            {\n");
    for kind in EntityKind::ALL {
        out.push_str(&format!(
            "                case {}: return {};\n",
            quoted(kind.as_tag()),
            primitive_for(kind)
        ));
    }
    out.push_str("                default: return PrimitiveType.Cube;\n");
    out.push_str("            }\n        }\n\n");

    out.push_str("        public static List<GameObject> SpawnAll()\n        {\n");
    out.push_str("            var spawned = new List<GameObject>();\n");
    out.push_str("            var byId = new Dictionary<string, GameObject>();\n\n");
    out.push_str("            foreach (var record in Entities)\n            {\n");
    out.push_str(
        "                var go = GameObject.CreatePrimitive(PrimitiveFor(record.Type));\n",
    );
    out.push_str("                go.name = record.Name;\n");
    out.push_str("                go.transform.position = record.Position;\n");
    out.push_str("                go.transform.eulerAngles = record.Rotation;\n");
    out.push_str("                go.transform.localScale = record.Scale;\n");
    out.push_str("                if (record.PhysicsEnabled)\n                {\n");
    out.push_str("                    var body = go.AddComponent<Rigidbody>();\n");
    out.push_str("                    body.mass = record.Mass;\n");
    out.push_str("                }\n");
    out.push_str("                byId[record.Id] = go;\n");
    out.push_str("                spawned.Add(go);\n");
    out.push_str("            }\n\n");
    out.push_str("            // Parent links resolve after every object exists.\n");
    out.push_str("            foreach (var record in Entities)\n            {\n");
    out.push_str(
        "                if (record.ParentId.Length > 0 && byId.TryGetValue(record.ParentId, out var parent))\n",
    );
    out.push_str("                {\n");
    out.push_str("                    byId[record.Id].transform.SetParent(parent.transform);\n");
    out.push_str("                }\n            }\n\n");
    out.push_str("            return spawned;\n        }\n    }\n}\n");
    out
}

fn lighting_setup(world: &World) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// Lighting setup: {} lights.\n",
        world.light_count()
    ));
    out.push_str("using System.Collections.Generic;\nusing UnityEngine;\n\n");
    out.push_str("namespace Wdl.Generated\n{\n");
    out.push_str("    public static class LightingSetup\n    {\n");
    out.push_str("        public struct LightRecord\n        {\n");
    out.push_str("            public string Name;\n");
    out.push_str("            public string Type;\n");
    out.push_str("            public Color Color;\n");
    out.push_str("            public float Intensity;\n");
    out.push_str("            public float Range;\n");
    out.push_str("            public float SpotAngle;\n");
    out.push_str("            public bool CastShadows;\n");
    out.push_str("            public Vector3 Position;\n");
    out.push_str("            public Vector3 Rotation;\n");
    out.push_str("        }\n\n");

    out.push_str("        public static readonly LightRecord[] Lights =\n        {\n");
    for light in world.lights() {
        out.push_str("            new LightRecord\n            {\n");
        out.push_str(&format!("                Name = {},\n", quoted(&light.name)));
        out.push_str(&format!(
            "                Type = {},\n",
            quoted(light.kind.as_tag())
        ));
        out.push_str(&format!("                Color = {},\n", cs_color(light.color)));
        out.push_str(&format!(
            "                Intensity = {}f,\n",
            float32(light.intensity)
        ));
        out.push_str(&format!(
            "                Range = {}f,\n",
            light.range.unwrap_or(0.0)
        ));
        out.push_str(&format!(
            "                SpotAngle = {}f,\n",
            light.spot_angle.unwrap_or(0.0)
        ));
        out.push_str(&format!(
            "                CastShadows = {},\n",
            cs_bool(light.cast_shadows)
        ));
        out.push_str(&format!(
            "                Position = {},\n",
            cs_vec3(light.transform.position)
        ));
        out.push_str(&format!(
            "                Rotation = {},\n",
            cs_vec3(light.transform.rotation)
        ));
        out.push_str("            },\n");
    }
    out.push_str("        };\n\n");

    out.push_str("        static LightType TypeFor(string lightType)\n        {\n");
    out.push_str("            switch (lightType)\n            {\n");
    for kind in LightKind::ALL {
        out.push_str(&format!(
            "                case {}: return {};\n",
            quoted(kind.as_tag()),
            light_type_for(kind)
        ));
    }
    out.push_str("                default: return LightType.Point;\n");
    out.push_str("            }\n        }\n\n");

    out.push_str("        public static List<Light> CreateLights()\n        {\n");
    out.push_str("            var created = new List<Light>();\n");
    out.push_str("            foreach (var record in Lights)\n            {\n");
    out.push_str("                var go = new GameObject(record.Name);\n");
    out.push_str("                go.transform.position = record.Position;\n");
    out.push_str("                go.transform.eulerAngles = record.Rotation;\n\n");
    out.push_str("                var light = go.AddComponent<Light>();\n");
    out.push_str("                light.type = TypeFor(record.Type);\n");
    out.push_str("                light.color = record.Color;\n");
    out.push_str("                light.intensity = record.Intensity;\n");
    out.push_str("                if (record.Range > 0f) light.range = record.Range;\n");
    out.push_str("                if (record.SpotAngle > 0f) light.spotAngle = record.SpotAngle;\n");
    out.push_str(
        "                light.shadows = record.CastShadows ? LightShadows.Soft : LightShadows.None;\n",
    );
    out.push_str("                created.Add(light);\n");
    out.push_str("            }\n            return created;\n        }\n    }\n}\n");
    out
}

fn environment_controller(world: &World) -> String {
    let env = &world.environment;
    let mut out = String::new();
    out.push_str("// Environment configuration.\nusing UnityEngine;\n\n");
    out.push_str("namespace Wdl.Generated\n{\n");
    out.push_str("    public static class EnvironmentController\n    {\n");
    out.push_str(&format!(
        "        public const string Weather = {};\n",
        quoted(env.weather.as_tag())
    ));
    out.push_str(&format!(
        "        public const int TimeHour = {};\n",
        env.time_of_day.hour
    ));
    out.push_str(&format!(
        "        public const int TimeMinute = {};\n",
        env.time_of_day.minute
    ));
    out.push_str(&format!(
        "        public const bool DayNightCycle = {};\n",
        cs_bool(env.time_of_day.day_night_cycle)
    ));
    out.push_str(&format!(
        "        public const float CycleDurationSeconds = {}f;\n",
        env.time_of_day.cycle_duration_seconds
    ));
    out.push_str(&format!(
        "        public static readonly Color AmbientLight = {};\n",
        cs_color(env.ambient_light)
    ));
    out.push_str(&format!(
        "        public const bool FogEnabled = {};\n",
        cs_bool(env.fog_enabled)
    ));
    out.push_str(&format!(
        "        public static readonly Color FogColor = {};\n",
        cs_color(env.fog_color)
    ));
    out.push_str(&format!(
        "        public const float FogDensity = {}f;\n",
        float32(env.fog_density)
    ));
    out.push_str(&format!(
        "        public const string SkyboxType = {};\n",
        quoted(&env.skybox.skybox_type)
    ));
    out.push_str(&format!(
        "        public static readonly Color SkyboxTint = {};\n",
        cs_color(env.skybox.tint_color)
    ));
    out.push_str(&format!(
        "        public const float SkyboxExposure = {}f;\n",
        float32(env.skybox.exposure)
    ));
    out.push_str(&format!(
        "        public const float SkyboxRotation = {}f;\n",
        env.skybox.rotation
    ));
    out.push_str(&format!(
        "        public static readonly Vector3 Gravity = {};\n",
        cs_vec3(env.gravity)
    ));
    out.push_str(&format!(
        "        public const string AudioReverbPreset = {};\n\n",
        quoted(env.audio_reverb_preset.as_deref().unwrap_or(""))
    ));

    out.push_str("        public static void Apply()\n        {\n");
    out.push_str("            RenderSettings.ambientLight = AmbientLight;\n");
    out.push_str("            RenderSettings.fog = FogEnabled;\n");
    out.push_str("            if (FogEnabled)\n            {\n");
    out.push_str("                RenderSettings.fogColor = FogColor;\n");
    out.push_str("                RenderSettings.fogDensity = FogDensity;\n");
    out.push_str("            }\n");
    out.push_str("            Physics.gravity = Gravity;\n");
    out.push_str(
        "            Debug.Log($\"Environment applied: weather={Weather}, time={TimeHour}:{TimeMinute}\");\n",
    );
    out.push_str("        }\n    }\n}\n");
    out
}

/// Typed mirror of the canonical JSON for `JsonUtility`, plus the enum
/// tags as constants. Static apart from being driven by the enum tables,
/// so every target ships the same schema surface.
fn world_data_types() -> String {
    let mut out = String::new();
    out.push_str("// Typed schema for the world_data.json dump.\nusing System;\n\n");
    out.push_str("namespace Wdl.Generated\n{\n");

    let enums: [(&str, Vec<&'static str>); 7] = [
        ("EntityTypes", EntityKind::ALL.iter().map(|k| k.as_tag()).collect()),
        ("LightTypes", LightKind::ALL.iter().map(|k| k.as_tag()).collect()),
        (
            "MaterialTypes",
            vec!["standard", "pbr", "unlit", "transparent", "emissive"],
        ),
        (
            "ColliderTypes",
            vec!["box", "sphere", "capsule", "mesh", "convex"],
        ),
        (
            "WeatherTypes",
            wdl_core::Weather::ALL.iter().map(|w| w.as_tag()).collect(),
        ),
        (
            "TriggerTypes",
            wdl_core::TriggerKind::ALL.iter().map(|t| t.as_tag()).collect(),
        ),
        (
            "ActionTypes",
            wdl_core::ActionKind::ALL.iter().map(|a| a.as_tag()).collect(),
        ),
    ];
    for (name, tags) in enums {
        out.push_str(&format!("    public static class {name}\n    {{\n"));
        for tag in tags {
            out.push_str(&format!(
                "        public const string {} = {};\n",
                pascal_case(tag),
                quoted(tag)
            ));
        }
        out.push_str("    }\n\n");
    }

    let classes: [(&str, &[(&str, &str)]); 12] = [
        ("Vector3Data", &[("x", "float"), ("y", "float"), ("z", "float")]),
        (
            "ColorData",
            &[("r", "float"), ("g", "float"), ("b", "float"), ("a", "float")],
        ),
        (
            "TransformData",
            &[
                ("position", "Vector3Data"),
                ("rotation", "Vector3Data"),
                ("scale", "Vector3Data"),
            ],
        ),
        (
            "MaterialData",
            &[
                ("name", "string"),
                ("material_type", "string"),
                ("base_color", "ColorData"),
                ("metallic", "float"),
                ("roughness", "float"),
                ("emission_strength", "float"),
                ("texture_path", "string"),
                ("normal_map_path", "string"),
            ],
        ),
        (
            "PhysicsData",
            &[
                ("enabled", "bool"),
                ("is_kinematic", "bool"),
                ("mass", "float"),
                ("drag", "float"),
                ("angular_drag", "float"),
                ("use_gravity", "bool"),
                ("collision_enabled", "bool"),
            ],
        ),
        (
            "ColliderData",
            &[
                ("collider_type", "string"),
                ("is_trigger", "bool"),
                ("center", "Vector3Data"),
                ("size", "Vector3Data"),
            ],
        ),
        (
            "EntityData",
            &[
                ("id", "string"),
                ("name", "string"),
                ("entity_type", "string"),
                ("transform", "TransformData"),
                ("material", "MaterialData"),
                ("physics", "PhysicsData"),
                ("collider", "ColliderData"),
                ("parent_id", "string"),
                ("children_ids", "string[]"),
                ("tags", "string[]"),
                ("asset_reference", "string"),
                ("prefab_reference", "string"),
            ],
        ),
        (
            "LightData",
            &[
                ("name", "string"),
                ("light_type", "string"),
                ("color", "ColorData"),
                ("intensity", "float"),
                ("cast_shadows", "bool"),
                ("transform", "TransformData"),
            ],
        ),
        (
            "TimeOfDayData",
            &[
                ("hour", "int"),
                ("minute", "int"),
                ("day_night_cycle", "bool"),
                ("cycle_duration_seconds", "float"),
            ],
        ),
        (
            "EnvironmentData",
            &[
                ("weather", "string"),
                ("time_of_day", "TimeOfDayData"),
                ("ambient_light", "ColorData"),
                ("fog_enabled", "bool"),
                ("fog_color", "ColorData"),
                ("fog_density", "float"),
                ("gravity", "Vector3Data"),
            ],
        ),
        (
            "MetadataData",
            &[
                ("title", "string"),
                ("description", "string"),
                ("author", "string"),
                ("version", "string"),
                ("created_at", "string"),
                ("updated_at", "string"),
                ("tags", "string[]"),
                ("target_platforms", "string[]"),
            ],
        ),
        (
            "WorldData",
            &[
                ("metadata", "MetadataData"),
                ("environment", "EnvironmentData"),
                ("entities", "EntityData[]"),
                ("lights", "LightData[]"),
            ],
        ),
    ];
    for (name, fields) in classes {
        out.push_str("    [Serializable]\n");
        out.push_str(&format!("    public class {name}\n    {{\n"));
        for (field, ty) in fields {
            out.push_str(&format!("        public {ty} {field};\n"));
        }
        out.push_str("    }\n\n");
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdl_core::sample::demo_world;

    #[test]
    fn generates_expected_file_set() {
        let files = UnityGenerator.generate(&demo_world()).unwrap();
        for path in [
            "Scripts/WorldLoader.cs",
            "Scripts/EntitySpawner.cs",
            "Scripts/LightingSetup.cs",
            "Scripts/EnvironmentController.cs",
            "Scripts/WorldData.cs",
            "Data/world_data.json",
        ] {
            assert!(files.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn loader_names_the_world() {
        let files = UnityGenerator.generate(&demo_world()).unwrap();
        let loader = &files["Scripts/WorldLoader.cs"];
        assert!(loader.contains("Forest Clearing"));
        assert!(loader.contains("class WorldLoader"));
    }

    #[test]
    fn spawner_lists_every_entity_and_kind_switch() {
        let world = demo_world();
        let files = UnityGenerator.generate(&world).unwrap();
        let spawner = &files["Scripts/EntitySpawner.cs"];
        for entity in world.entities() {
            assert!(spawner.contains(&entity.name));
        }
        assert!(spawner.contains("case \"terrain\": return PrimitiveType.Plane;"));
    }

    #[test]
    fn lighting_lists_lights_and_type_switch() {
        let files = UnityGenerator.generate(&demo_world()).unwrap();
        let lighting = &files["Scripts/LightingSetup.cs"];
        assert!(lighting.contains("Sun"));
        assert!(lighting.contains("CampfireGlow"));
        assert!(lighting.contains("case \"directional\": return LightType.Directional;"));
    }

    #[test]
    fn environment_carries_every_field() {
        let files = UnityGenerator.generate(&demo_world()).unwrap();
        let env = &files["Scripts/EnvironmentController.cs"];
        for needle in [
            "Weather",
            "TimeHour",
            "FogDensity",
            "SkyboxType",
            "Gravity",
            "AmbientLight",
        ] {
            assert!(env.contains(needle), "missing {needle}");
        }
        assert!(env.contains("\"foggy\""));
    }

    #[test]
    fn schema_file_covers_enums_and_shapes() {
        let files = UnityGenerator.generate(&demo_world()).unwrap();
        let schema = &files["Scripts/WorldData.cs"];
        assert!(schema.contains("public static class EntityTypes"));
        assert!(schema.contains("public const string StaticMesh = \"static_mesh\";"));
        assert!(schema.contains("public class WorldData"));
        assert!(schema.contains("public EntityData[] entities;"));
    }
}
