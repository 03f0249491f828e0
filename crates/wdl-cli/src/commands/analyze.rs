use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use wdl_spatial::SpatialReasoner;

pub fn run(file: &Path, as_json: bool) -> Result<(), String> {
    let world = super::load_world(file)?;
    let mut reasoner = SpatialReasoner::new(&world);
    let report = reasoner.analyze();

    if as_json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("cannot serialize report: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    println!("  Spatial analysis for '{}'", world.meta.title);
    println!();
    println!("  {} entities", report.entity_count);

    match &report.world_bounds {
        Some(bounds) => {
            println!("  bounds  min {}  max {}", bounds.min, bounds.max);
            println!("  size    {}  volume {:.1}", bounds.size, bounds.volume);
        }
        None => println!("  no entities, no derived bounds"),
    }
    println!("  density {:.6} entities per unit volume", report.density);
    println!();

    if report.collisions.is_empty() {
        println!("  No colliding pairs.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["First", "Second"]);
    for pair in &report.collisions {
        table.add_row(vec![&pair.first, &pair.second]);
    }
    println!("{table}");
    println!();
    println!("  {} colliding pair(s)", report.collision_count);

    Ok(())
}
