use std::path::Path;

use wdl_core::EntityKind;

pub fn run(file: &Path) -> Result<(), String> {
    let world = super::load_world(file)?;

    println!("  {}", world.meta.title);
    if !world.meta.description.is_empty() {
        println!("  {}", world.meta.description);
    }
    if !world.meta.author.is_empty() {
        println!("  by {} (v{})", world.meta.author, world.meta.version);
    }
    println!();
    println!(
        "  {} entities, {} lights, {} systems",
        world.entity_count(),
        world.light_count(),
        world.system_count()
    );

    for kind in EntityKind::ALL {
        let count = world.entities_by_kind(kind).len();
        if count > 0 {
            println!("    {count:>4} {kind}");
        }
    }

    Ok(())
}
