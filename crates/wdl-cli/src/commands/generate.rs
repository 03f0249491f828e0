use std::path::Path;

use wdl_codegen::{Generator, all_generators, generator_for, write_files};

pub fn run(target: &str, file: &Path, out: &Path) -> Result<(), String> {
    let world = super::load_world(file)?;

    let generators: Vec<Box<dyn Generator>> = if target == "all" {
        all_generators()
    } else {
        match generator_for(target) {
            Some(generator) => vec![generator],
            None => {
                return Err(format!(
                    "unknown target: \"{target}\". Use: unity, unreal, horizon, all"
                ));
            }
        }
    };

    for generator in generators {
        let platform = generator.platform_name();
        let files = generator
            .generate(&world)
            .map_err(|e| format!("{platform}: {e}"))?;

        let root = out.join(platform);
        let written =
            write_files(&root, &files).map_err(|e| format!("cannot write {platform}: {e}"))?;

        println!("  {platform}: {} files", written.len());
        for path in written {
            println!("    {}", path.display());
        }
    }

    Ok(())
}
