//! EntityIt CLI - entity generation tool.
//!
//! Run from a crate root:
//!
//! ```bash
//! entityit generate
//! entityit check --src src
//! ```
//!
//! See `entityit --help` for all available commands and options.

mod commands;

use clap::{Parser, Subcommand};
use commands::Overrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "entityit", about = "EntityIt entity generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate entity modules for every annotated struct
    Generate {
        /// Config file (defaults to ./entityit.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Source tree to inspect
        #[arg(long)]
        src: Option<PathBuf>,

        /// Root to write generated modules under
        #[arg(long)]
        out: Option<PathBuf>,

        /// Plan and render without writing files
        #[arg(long)]
        dry_run: bool,

        /// Format generated files with rustfmt
        #[arg(long)]
        rustfmt: bool,
    },
    /// Report declarations that cannot be generated
    Check {
        /// Config file (defaults to ./entityit.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Source tree to inspect
        #[arg(long)]
        src: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config, src, out, dry_run, rustfmt } => {
            let overrides = Overrides { config, src, out, rustfmt };
            commands::generate::run(&overrides, dry_run)
        }
        Commands::Check { config, src } => {
            let overrides = Overrides { config, src, ..Overrides::default() };
            commands::check::run(&overrides)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
