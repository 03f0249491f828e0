pub mod analyze;
pub mod generate;
pub mod info;
pub mod init;
pub mod validate;

use std::path::Path;

use wdl_core::World;

/// Load a world from its canonical JSON file.
fn load_world(path: &Path) -> Result<World, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    World::from_json(&json).map_err(|e| e.to_string())
}
