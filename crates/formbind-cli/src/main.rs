//! formbind CLI
//!
//! Command-line front end for authors of widget description documents

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "formbind")]
#[command(about = "formbind - Widget description inspection and routing", long_about = None)]
struct Cli {
    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the widgets of a description document
    Inspect(commands::inspect::InspectArgs),
    /// Check whether a description id routes to this engine
    Route(commands::route::RouteArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        formbind_core::logging_facility::init(formbind_core::logging_facility::Profile::Development);
    }

    let result = match cli.command {
        Commands::Inspect(args) => commands::inspect::execute(args),
        Commands::Route(args) => commands::route::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
