mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sysbars_core::config;

#[derive(Parser)]
#[command(
    name = "sysbars",
    version,
    about = "Policy-driven system bar visibility for multi-display shells"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration files
    Init,
    /// Check configuration and bar rules for problems
    Doctor,
    /// Show which bars a package forces shown or hidden
    Query {
        /// Package name (a `package/class` component is accepted)
        package: String,
        /// Bar rules file (defaults to ~/.config/sysbars/bar-rules.toml)
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay a JSON-lines display event script and print channel calls
    Replay(commands::replay::ReplayArgs),
    /// Follow bar rules edits and print the resulting updates
    Watch(commands::watch::WatchArgs),
}

fn main() {
    let cli = Cli::parse();
    let config = config::load();
    if let Err(e) = sysbars_core::log::init(&config.logging) {
        eprintln!("Warning: file logging disabled: {e}");
    }

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Doctor => commands::doctor::execute(),
        Commands::Query {
            package,
            rules,
            json,
        } => commands::query::execute(&package, rules.as_deref(), json),
        Commands::Replay(args) => commands::replay::execute(&args),
        Commands::Watch(args) => commands::watch::execute(&args, &config),
    }
}
