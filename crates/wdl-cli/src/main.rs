//! CLI frontend for the WDL world-description toolkit.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wdl",
    about = "WDL — validate, analyze, and translate 3D world descriptions",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new world directory seeded with a demo world.json
    Init {
        /// Name of the world to create
        name: String,
    },

    /// Show a summary of a world file
    Info {
        /// Path to the world JSON file
        #[arg(short, long, default_value = "world.json")]
        file: PathBuf,
    },

    /// Run the validation rules and report issues
    Validate {
        /// Path to the world JSON file
        #[arg(short, long, default_value = "world.json")]
        file: PathBuf,
    },

    /// Run spatial analysis: bounds, collisions, density
    Analyze {
        /// Path to the world JSON file
        #[arg(short, long, default_value = "world.json")]
        file: PathBuf,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate engine code from a world file
    Generate {
        /// Target platform: unity, unreal, horizon, or all
        target: String,

        /// Path to the world JSON file
        #[arg(short, long, default_value = "world.json")]
        file: PathBuf,

        /// Output root directory
        #[arg(short, long, default_value = "output")]
        out: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Info { file } => commands::info::run(&file),
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Analyze { file, json } => commands::analyze::run(&file, json),
        Commands::Generate { target, file, out } => commands::generate::run(&target, &file, &out),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
