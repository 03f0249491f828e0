//! Code generators projecting a [`wdl_core::World`] into engine-specific
//! file sets.
//!
//! A generator is a pure function from a world to a mapping of relative
//! file path → text content; persistence is a separate step
//! ([`write_files`]). The three concrete targets expose the same data —
//! every entity, light, and environment field — in three surface
//! syntaxes: C# scripting classes (Unity), Python data tables (Unreal),
//! and typed TypeScript interfaces (Horizon). Output is deterministic
//! for a given world: ordered collections only, no randomness, no clock
//! reads beyond the world's own metadata timestamps.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use wdl_core::{WdlResult, World};

/// Shared literal/identifier formatting helpers.
pub mod emit;
/// The Meta Horizon Worlds (TypeScript) target.
pub mod horizon;
/// The Unity (C#) target.
pub mod unity;
/// The Unreal Engine (Python) target.
pub mod unreal;

pub use horizon::HorizonGenerator;
pub use unity::UnityGenerator;
pub use unreal::UnrealGenerator;

/// Generated output: relative file path → text content. A `BTreeMap`
/// keeps iteration (and therefore persistence and diffing) ordered.
pub type GeneratedFiles = BTreeMap<String, String>;

/// A code generator for one engine target.
pub trait Generator {
    /// Short platform name, usable as an output subdirectory.
    fn platform_name(&self) -> &'static str;

    /// Extension of the generated behavior code, dot included.
    fn file_extension(&self) -> &'static str;

    /// Generate all artifacts for a world. Pure: no filesystem access,
    /// deterministic output for a given world.
    fn generate(&self, world: &World) -> WdlResult<GeneratedFiles>;
}

/// Look up a generator by platform name.
pub fn generator_for(name: &str) -> Option<Box<dyn Generator>> {
    match name {
        "unity" => Some(Box::new(UnityGenerator)),
        "unreal" => Some(Box::new(UnrealGenerator)),
        "horizon" => Some(Box::new(HorizonGenerator)),
        _ => None,
    }
}

/// All generators, in canonical order.
pub fn all_generators() -> Vec<Box<dyn Generator>> {
    vec![
        Box::new(UnityGenerator),
        Box::new(UnrealGenerator),
        Box::new(HorizonGenerator),
    ]
}

/// Persist a generated mapping under `root`, creating parent directories
/// as needed and overwriting existing files. Returns the written paths
/// in mapping order.
pub fn write_files(root: &Path, files: &GeneratedFiles) -> io::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wdl_core::sample::demo_world;

    #[test]
    fn registry_knows_all_platforms() {
        for name in ["unity", "unreal", "horizon"] {
            let generator = generator_for(name).unwrap();
            assert_eq!(generator.platform_name(), name);
        }
        assert!(generator_for("source2").is_none());
    }

    #[test]
    fn extensions() {
        assert_eq!(UnityGenerator.file_extension(), ".cs");
        assert_eq!(UnrealGenerator.file_extension(), ".py");
        assert_eq!(HorizonGenerator.file_extension(), ".ts");
    }

    #[test]
    fn write_files_creates_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = GeneratedFiles::new();
        files.insert("Scripts/a.cs".to_string(), "first".to_string());
        files.insert("Data/world.json".to_string(), "{}".to_string());

        let written = write_files(dir.path(), &files).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.path().join("Scripts/a.cs").exists());

        files.insert("Scripts/a.cs".to_string(), "second".to_string());
        write_files(dir.path(), &files).unwrap();
        let content = std::fs::read_to_string(dir.path().join("Scripts/a.cs")).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn every_generator_is_deterministic() {
        let world = demo_world();
        for generator in all_generators() {
            let first = generator.generate(&world).unwrap();
            let second = generator.generate(&world).unwrap();
            assert_eq!(first, second, "{} output varies", generator.platform_name());
        }
    }

    #[test]
    fn every_generator_emits_the_data_dump() {
        let world = demo_world();
        for generator in all_generators() {
            let files = generator.generate(&world).unwrap();
            let dump = files
                .iter()
                .find(|(path, _)| path.ends_with("world_data.json"))
                .map(|(_, content)| content)
                .unwrap_or_else(|| panic!("{} has no data dump", generator.platform_name()));
            let back = World::from_json(dump).unwrap();
            assert_eq!(back, world);
        }
    }

    #[test]
    fn every_generator_names_all_entities_and_lights() {
        let world = demo_world();
        for generator in all_generators() {
            let files = generator.generate(&world).unwrap();
            let combined: String = files.values().cloned().collect();
            for entity in world.entities() {
                assert!(
                    combined.contains(&entity.name),
                    "{} output is missing entity {}",
                    generator.platform_name(),
                    entity.name
                );
            }
            for light in world.lights() {
                assert!(
                    combined.contains(&light.name),
                    "{} output is missing light {}",
                    generator.platform_name(),
                    light.name
                );
            }
        }
    }
}
