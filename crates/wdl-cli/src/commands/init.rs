use std::fs;
use std::path::Path;

use wdl_core::sample::demo_world;

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);
    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }
    fs::create_dir_all(dir).map_err(|e| format!("cannot create '{name}': {e}"))?;

    let mut world = demo_world();
    world.meta.title = name.to_string();

    let json = world.to_json().map_err(|e| e.to_string())?;
    let path = dir.join("world.json");
    fs::write(&path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;

    println!("  Created world '{name}'.");
    println!(
        "  {} entities, {} lights, {} systems in {}",
        world.entity_count(),
        world.light_count(),
        world.system_count(),
        path.display()
    );

    Ok(())
}
